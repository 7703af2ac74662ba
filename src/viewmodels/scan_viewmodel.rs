// ============================================================================
// SCAN VIEWMODEL - Seleccion de captura y request de OCR
// ============================================================================

use crate::errors::{AdvisorError, AdvisorResult};
use crate::models::{ScanResult, SelectedFile};
use crate::services::Gateway;
use crate::state::{DashboardState, ReactiveState, Toast, WorkflowPhase};

/// Resultado de disparar un scan
#[derive(Clone, PartialEq, Debug)]
pub enum ScanDispatch {
    Completed(ScanResult),
    /// Ya habia un scan o prediccion en vuelo, o el popup esta abierto
    Ignored,
}

/// ViewModel de scan
pub struct ScanViewModel<'a, G: Gateway> {
    gateway: &'a G,
    state: &'a ReactiveState<DashboardState>,
}

impl<'a, G: Gateway> ScanViewModel<'a, G> {
    pub fn new(gateway: &'a G, state: &'a ReactiveState<DashboardState>) -> Self {
        Self { gateway, state }
    }

    /// Reemplaza la captura y descarta cualquier resultado previo
    ///
    /// Se rechaza mientras hay un request en vuelo o sin sesion.
    pub fn select_file(&self, file: SelectedFile) -> bool {
        self.state.update(|state| {
            if state.phase.is_busy() || state.phase == WorkflowPhase::Unauthenticated {
                log::warn!("⚠️ [SCAN] Seleccion ignorada en fase {:?}", state.phase);
                return false;
            }
            log::info!("🖼️ [SCAN] Archivo seleccionado: {}", file.name);
            state.selected_file = Some(file);
            state.scan_result = None;
            state.context = None;
            state.phase = WorkflowPhase::FileSelected;
            true
        })
    }

    /// Un unico `submit_scan` por invocacion, sin reintentos
    pub async fn run_scan(&self) -> AdvisorResult<ScanDispatch> {
        let file = self.state.update(|state| {
            if state.phase == WorkflowPhase::Unauthenticated {
                return Err(AdvisorError::Unauthenticated);
            }
            if !state.phase.accepts_scan() {
                return Ok(None);
            }
            match state.selected_file.clone() {
                Some(file) => {
                    state.phase = WorkflowPhase::Scanning;
                    Ok(Some(file))
                }
                None => Err(AdvisorError::NoFileSelected),
            }
        })
        .map_err(|e| self.report(e))?;

        let file = match file {
            Some(file) => file,
            None => {
                log::info!("⏳ [SCAN] Scan ignorado, ya hay trabajo en curso");
                return Ok(ScanDispatch::Ignored);
            }
        };

        log::info!("🔍 [SCAN] Analizando {}", file.name);
        let outcome = self.gateway.submit_scan(&file).await.and_then(ScanResult::validate);

        let result = self.state.update(|state| match outcome {
            // Logout durante el request: la sesion ya no es de este scan
            _ if state.phase == WorkflowPhase::Unauthenticated => {
                log::warn!("🔒 [SCAN] Respuesta descartada, sesion terminada");
                Err(AdvisorError::Unauthenticated)
            }
            Ok(scan) => {
                log::info!("✅ [SCAN] Asistencia detectada: {}%", scan.overall_attendance());
                state.scan_result = Some(scan.clone());
                state.phase = WorkflowPhase::ScanResolved;
                state.push_toast(Toast::success("Evidence Analyzed"));
                Ok(ScanDispatch::Completed(scan))
            }
            Err(e) => {
                log::error!("❌ [SCAN] Scan fallido: {}", e);
                state.scan_result = None;
                state.phase = WorkflowPhase::ScanFailed;
                Err(e)
            }
        });
        result.map_err(|e| self.report(e))
    }

    /// Toast de error solo para los fallos que el usuario debe ver
    fn report(&self, error: AdvisorError) -> AdvisorError {
        if error.is_user_facing() {
            self.state.update(|state| state.push_toast(Toast::error(error.user_message())));
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scan_result, screenshot, FakeGateway};

    #[test]
    fn second_selection_replaces_file_and_clears_result() {
        let gateway = FakeGateway::default();
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);

        assert!(scanner.select_file(screenshot("first.png")));
        state.update(|s| s.scan_result = Some(scan_result(70.0)));
        assert!(scanner.select_file(screenshot("second.png")));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.selected_file.map(|f| f.name), Some("second.png".to_string()));
        assert!(snapshot.scan_result.is_none());
        assert_eq!(snapshot.phase, WorkflowPhase::FileSelected);
    }

    #[tokio::test]
    async fn scan_without_file_fails_and_calls_nothing() {
        let gateway = FakeGateway::default();
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);

        assert_eq!(scanner.run_scan().await, Err(AdvisorError::NoFileSelected));
        assert_eq!(gateway.count("submit_scan"), 0);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, WorkflowPhase::Idle);
        assert_eq!(snapshot.toasts[0].message, "Please upload a screenshot first");
    }

    #[tokio::test]
    async fn failed_scan_keeps_file_for_retry() {
        let gateway = FakeGateway::default();
        *gateway.scan.borrow_mut() = Err(AdvisorError::Scan("HTTP 500: OCR Engine Error".into()));
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);
        scanner.select_file(screenshot("portal.png"));

        assert!(matches!(scanner.run_scan().await, Err(AdvisorError::Scan(_))));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, WorkflowPhase::ScanFailed);
        assert!(snapshot.scan_result.is_none());
        assert!(snapshot.selected_file.is_some());
        assert_eq!(snapshot.toasts.last().map(|t| t.message.as_str()), Some("Scan Failed"));

        *gateway.scan.borrow_mut() = Ok(scan_result(91.0));
        assert!(matches!(scanner.run_scan().await, Ok(ScanDispatch::Completed(_))));
        assert_eq!(gateway.count("submit_scan"), 2);
    }

    #[tokio::test]
    async fn out_of_range_reading_is_a_scan_failure() {
        let gateway = FakeGateway::default();
        *gateway.scan.borrow_mut() = Ok(scan_result(120.0));
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);
        scanner.select_file(screenshot("portal.png"));

        assert_eq!(scanner.run_scan().await, Err(AdvisorError::InvalidAttendance(120.0)));
        assert!(state.snapshot().scan_result.is_none());
        assert_eq!(state.snapshot().phase, WorkflowPhase::ScanFailed);
    }

    #[tokio::test]
    async fn concurrent_trigger_while_scanning_is_a_no_op() {
        let gateway = FakeGateway::default();
        gateway.yield_before_reply.set(true);
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);
        scanner.select_file(screenshot("portal.png"));

        let (first, second) = tokio::join!(scanner.run_scan(), scanner.run_scan());
        assert!(matches!(first, Ok(ScanDispatch::Completed(_))));
        assert_eq!(second, Ok(ScanDispatch::Ignored));
        assert_eq!(*gateway.scanned_files.borrow(), vec!["portal.png".to_string()]);
    }

    #[tokio::test]
    async fn scan_after_logout_is_rejected_silently() {
        let gateway = FakeGateway::default();
        let state = ReactiveState::new(DashboardState::new());
        let scanner = ScanViewModel::new(&gateway, &state);
        scanner.select_file(screenshot("portal.png"));
        state.update(|s| s.phase = WorkflowPhase::Unauthenticated);

        assert_eq!(scanner.run_scan().await, Err(AdvisorError::Unauthenticated));
        assert!(state.snapshot().toasts.is_empty());
        assert!(gateway.scanned_files.borrow().is_empty());
    }
}
