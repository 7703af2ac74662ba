// ============================================================================
// PREDICTION VIEWMODEL - Resolver de veredicto con modo Lite
// ============================================================================
// Un fallo del motor de prediccion es un modo de operacion normal: se
// sintetiza el veredicto degradado y el flujo sigue.
// ============================================================================

use crate::models::{PredictionOutcome, PredictionRequest, Verdict};
use crate::services::Gateway;
use crate::state::{DashboardState, ReactiveState, ResolutionKind, Toast, WorkflowPhase};

pub struct PredictionViewModel<'a, G: Gateway> {
    gateway: &'a G,
    state: &'a ReactiveState<DashboardState>,
}

impl<'a, G: Gateway> PredictionViewModel<'a, G> {
    pub fn new(gateway: &'a G, state: &'a ReactiveState<DashboardState>) -> Self {
        Self { gateway, state }
    }

    /// Llama al motor y clasifica la respuesta, sin tocar el estado
    pub async fn request(&self, request: &PredictionRequest) -> PredictionOutcome {
        match self.gateway.request_prediction(request).await {
            Ok(verdict) => {
                log::info!("🎯 [PREDICT] Veredicto: {} ({})", verdict.prediction, verdict.confidence);
                PredictionOutcome::Full(verdict)
            }
            Err(e) => {
                log::warn!("⚠️ [PREDICT] Motor no disponible, modo Lite: {}", e);
                PredictionOutcome::Degraded(Verdict::degraded())
            }
        }
    }

    /// Resuelve y mezcla el veredicto en el ScanResult actual
    ///
    /// Si la sesion termino mientras tanto el estado no se toca.
    pub async fn resolve(&self, request: &PredictionRequest) -> PredictionOutcome {
        let outcome = self.request(request).await;
        self.state.update(|state| {
            if state.phase == WorkflowPhase::Unauthenticated {
                log::warn!("🔒 [PREDICT] Veredicto descartado, sesion terminada");
                return;
            }
            if let Some(scan) = state.scan_result.as_mut() {
                scan.attach_verdict(outcome.verdict().clone());
            }
            state.push_toast(Toast::success(outcome.feedback_message()));
            state.phase = WorkflowPhase::Resolved(if outcome.is_degraded() {
                ResolutionKind::Degraded
            } else {
                ResolutionKind::Full
            });
        });
        outcome
    }
}
