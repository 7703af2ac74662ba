// ============================================================================
// ERRORS - Taxonomia de fallos del flujo de asistencia
// ============================================================================

use thiserror::Error;

/// Errores del advisor
///
/// Solo `Credential`, `Registration`, `NoFileSelected`, `Scan` e
/// `InvalidAttendance` llegan al usuario como fallo. `PredictionUnavailable`
/// se convierte en un veredicto degradado y `History` en una lista vacia.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    #[error("invalid credentials")]
    Credential,

    #[error("{0}")]
    Registration(String),

    #[error("no screenshot selected")]
    NoFileSelected,

    #[error("scan failed: {0}")]
    Scan(String),

    #[error("attendance reading {0} is outside 0-100")]
    InvalidAttendance(f64),

    #[error("prediction engine unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("history unavailable: {0}")]
    History(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("no active session")]
    Unauthenticated,
}

impl AdvisorError {
    /// Indica si el error se muestra como fallo explicito al usuario
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AdvisorError::Credential
                | AdvisorError::Registration(_)
                | AdvisorError::NoFileSelected
                | AdvisorError::Scan(_)
                | AdvisorError::InvalidAttendance(_)
        )
    }

    /// Mensaje corto para el toast
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Credential => "Invalid Credentials. Try again.".to_string(),
            AdvisorError::Registration(message) => message.clone(),
            AdvisorError::NoFileSelected => "Please upload a screenshot first".to_string(),
            AdvisorError::Scan(_) => "Scan Failed".to_string(),
            AdvisorError::InvalidAttendance(value) => {
                format!("Scan Failed: attendance {} is outside 0-100", value)
            }
            other => other.to_string(),
        }
    }
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
