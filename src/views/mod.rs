// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin logica de negocio)
// ============================================================================

pub mod forms;
pub mod login;
pub mod signup;
pub mod dashboard;
pub mod chart;
pub mod context_modal;
pub mod toasts;

pub use login::render_login;
pub use signup::render_signup;
pub use dashboard::render_dashboard;
pub use toasts::render_toasts;
