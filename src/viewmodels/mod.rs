// ============================================================================
// VIEWMODELS - Logica de UI sobre el estado reactivo
// ============================================================================

pub mod auth_viewmodel;
pub mod context_viewmodel;
pub mod history_viewmodel;
pub mod prediction_viewmodel;
pub mod scan_viewmodel;
pub mod workflow_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use context_viewmodel::ContextViewModel;
pub use history_viewmodel::HistoryViewModel;
pub use prediction_viewmodel::PredictionViewModel;
pub use scan_viewmodel::{ScanDispatch, ScanViewModel};
pub use workflow_viewmodel::{Startup, WorkflowController};
