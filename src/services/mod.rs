pub mod gateway;
pub mod token_store;
#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use gateway::Gateway;
pub use token_store::*;
#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
