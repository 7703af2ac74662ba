// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod workflow_state;

pub use reactivity::*;
pub use session_state::*;
pub use workflow_state::*;
