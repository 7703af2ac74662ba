// ============================================================================
// WORKFLOW STATE - Estado del dashboard (fase, archivo, scan, contexto, historial)
// ============================================================================

use uuid::Uuid;
use crate::models::{Context, HistoryLog, ScanResult, SelectedFile};

/// Como se resolvio la ultima prediccion
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResolutionKind {
    Full,
    Degraded,
}

/// Fase del flujo de evaluacion
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WorkflowPhase {
    /// Terminal: la navegacion toma el control
    Unauthenticated,
    Idle,
    FileSelected,
    Scanning,
    ScanFailed,
    /// Transitoria: avanza sola a `ContextCollecting`
    ScanResolved,
    ContextCollecting,
    Predicting,
    Resolved(ResolutionKind),
}

impl WorkflowPhase {
    /// Hay un request en vuelo
    pub fn is_busy(self) -> bool {
        matches!(self, WorkflowPhase::Scanning | WorkflowPhase::Predicting)
    }

    /// Fases desde las que se puede lanzar un scan
    pub fn accepts_scan(self) -> bool {
        matches!(
            self,
            WorkflowPhase::Idle
                | WorkflowPhase::FileSelected
                | WorkflowPhase::ScanFailed
                | WorkflowPhase::Resolved(_)
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastTone {
    Success,
    Error,
}

/// Feedback efimero para el usuario
#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub id: Uuid,
    pub tone: ToastTone,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tone: ToastTone::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tone: ToastTone::Error,
            message: message.into(),
        }
    }
}

/// Estado del dashboard, propiedad exclusiva del controller
#[derive(Clone, PartialEq, Debug)]
pub struct DashboardState {
    pub phase: WorkflowPhase,
    pub selected_file: Option<SelectedFile>,
    pub scan_result: Option<ScanResult>,
    /// `Some` mientras el popup de contexto esta abierto
    pub context: Option<Context>,
    /// Orden del backend: mas reciente primero
    pub history: Vec<HistoryLog>,
    pub toasts: Vec<Toast>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            phase: WorkflowPhase::Idle,
            selected_file: None,
            scan_result: None,
            context: None,
            history: Vec::new(),
            toasts: Vec::new(),
        }
    }

    /// Flag de carga del boton de scan
    pub fn is_scanning(&self) -> bool {
        self.phase == WorkflowPhase::Scanning
    }

    /// Fase de reposo segun haya archivo o no
    pub fn resting_phase(&self) -> WorkflowPhase {
        if self.selected_file.is_some() {
            WorkflowPhase::FileSelected
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resting_phases_accept_a_scan() {
        assert!(WorkflowPhase::FileSelected.accepts_scan());
        assert!(WorkflowPhase::ScanFailed.accepts_scan());
        assert!(WorkflowPhase::Resolved(ResolutionKind::Degraded).accepts_scan());
        assert!(!WorkflowPhase::Scanning.accepts_scan());
        assert!(!WorkflowPhase::Predicting.accepts_scan());
        assert!(!WorkflowPhase::ContextCollecting.accepts_scan());
        assert!(!WorkflowPhase::Unauthenticated.accepts_scan());
    }

    #[test]
    fn resting_phase_depends_on_selected_file() {
        let mut state = DashboardState::new();
        assert_eq!(state.resting_phase(), WorkflowPhase::Idle);
        state.selected_file = Some(SelectedFile::new("a.png", "image/png", vec![1]));
        assert_eq!(state.resting_phase(), WorkflowPhase::FileSelected);
    }
}
