pub mod auth;
pub mod scan;
pub mod context;
pub mod verdict;
pub mod history;

pub use auth::*;
pub use scan::*;
pub use context::*;
pub use verdict::*;
pub use history::*;
