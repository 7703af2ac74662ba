// ============================================================================
// WORKFLOW VIEWMODEL - Controller del dashboard
// ============================================================================
// Orquesta scan -> contexto -> prediccion -> historial. Es el unico dueño del
// DashboardState; las vistas leen snapshots y llaman estos metodos.
//
// Orden garantizado: request_prediction solo despues de un submit_scan
// exitoso, list_history solo despues de resolver la prediccion.
// ============================================================================

use chrono::{DateTime, FixedOffset, Offset, Utc};
use uuid::Uuid;
use crate::errors::AdvisorResult;
use crate::models::{ChartPoint, HistoryCard, PredictionOutcome, SelectedFile};
use crate::services::{Gateway, TokenStore};
use crate::state::{DashboardState, ReactiveState, Route, Session, SessionGuard, WorkflowPhase};
use crate::viewmodels::context_viewmodel::ContextViewModel;
use crate::viewmodels::history_viewmodel::{self, HistoryViewModel};
use crate::viewmodels::prediction_viewmodel::PredictionViewModel;
use crate::viewmodels::scan_viewmodel::{ScanDispatch, ScanViewModel};

/// Resultado de montar el dashboard
pub enum Startup<G: Gateway, S: TokenStore> {
    Ready(WorkflowController<G, S>),
    /// Sin token: no se inicializa nada, la app navega a esta ruta
    Redirect(Route),
}

pub struct WorkflowController<G: Gateway, S: TokenStore> {
    gateway: G,
    store: S,
    state: ReactiveState<DashboardState>,
    utc_offset: FixedOffset,
}

impl<G: Gateway, S: TokenStore> WorkflowController<G, S> {
    /// Chequea la sesion y arma el controller con un gateway autenticado
    pub fn start(store: S, now: DateTime<Utc>, make_gateway: impl FnOnce(&Session) -> G) -> Startup<G, S> {
        match SessionGuard::check(&store, now) {
            Some(session) => {
                log::info!("🚀 [APP] Dashboard listo");
                Startup::Ready(Self {
                    gateway: make_gateway(&session),
                    store,
                    state: ReactiveState::new(DashboardState::new()),
                    utc_offset: Utc.fix(),
                })
            }
            None => {
                log::info!("🔒 [SESSION] Sin token, redirigiendo a login");
                Startup::Redirect(Route::Login)
            }
        }
    }

    /// Zona horaria del usuario para las etiquetas del historial
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn state(&self) -> &ReactiveState<DashboardState> {
        &self.state
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.snapshot()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Carga inicial del historial al montar
    pub async fn initialize(&self) -> usize {
        self.refresh_history().await
    }

    pub fn select_file(&self, file: SelectedFile) -> bool {
        ScanViewModel::new(&self.gateway, &self.state).select_file(file)
    }

    /// Escanea y, si sale bien, abre el popup de contexto
    pub async fn run_scan(&self) -> AdvisorResult<ScanDispatch> {
        let dispatch = ScanViewModel::new(&self.gateway, &self.state).run_scan().await?;
        if let ScanDispatch::Completed(_) = dispatch {
            self.collector().open();
        }
        Ok(dispatch)
    }

    /// Acceso a los setters del popup
    pub fn collector(&self) -> ContextViewModel<'_> {
        ContextViewModel::new(&self.state)
    }

    pub fn cancel_context(&self) -> bool {
        self.collector().cancel()
    }

    /// Envia el contexto; resuelve el veredicto y refresca el historial una vez
    ///
    /// Devuelve `None` si el popup no estaba abierto (doble submit, por ejemplo)
    /// o si la sesion termino antes de la respuesta.
    pub async fn submit_context(&self) -> Option<PredictionOutcome> {
        let request = self.state.update(|state| {
            if state.phase != WorkflowPhase::ContextCollecting {
                return None;
            }
            let request = ContextViewModel::build_request(state)?;
            state.phase = WorkflowPhase::Predicting;
            Some(request)
        })?;

        log::info!("🎯 [PREDICT] Enviando contexto para {}", request.filename);
        let outcome = PredictionViewModel::new(&self.gateway, &self.state).resolve(&request).await;
        let terminated = self.state.update(|state| {
            state.context = None;
            state.phase == WorkflowPhase::Unauthenticated
        });
        if terminated {
            log::info!("🔒 [SESSION] Logout durante la prediccion, sin refresco");
            return None;
        }
        self.refresh_history().await;
        Some(outcome)
    }

    pub async fn refresh_history(&self) -> usize {
        HistoryViewModel::new(&self.gateway, &self.state).refresh().await
    }

    /// Puntos del grafico; `None` con menos de dos registros
    pub fn chart_points(&self) -> Option<Vec<ChartPoint>> {
        self.state.with(|state| history_viewmodel::chart(&state.history, self.utc_offset))
    }

    pub fn history_cards(&self) -> Vec<HistoryCard> {
        self.state.with(|state| history_viewmodel::cards(&state.history, self.utc_offset))
    }

    pub fn dismiss_toast(&self, id: Uuid) {
        self.state.update(|state| state.toasts.retain(|toast| toast.id != id));
    }

    /// Logout: borra el token y deja el dashboard inerte. Idempotente.
    pub fn terminate_session(&self) -> Route {
        let route = SessionGuard::terminate(&self.store);
        self.state.update(|state| {
            state.phase = WorkflowPhase::Unauthenticated;
            state.context = None;
        });
        route
    }
}
