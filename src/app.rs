// ============================================================================
// APP - Router por hash y ciclo de render
// ============================================================================
// Los cambios de estado no re-renderizan en linea: se agenda un render con
// Timeout(0) para no tomar el APP mientras un handler lo tiene prestado.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use chrono::{FixedOffset, Offset, Utc};
use gloo_timers::callback::Timeout;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{ElementBuilder, append_child, current_route, document, get_element_by_id, navigate, set_inner_html};
use crate::services::{ApiClient, LocalTokenStore};
use crate::state::{ReactiveState, Route, Toast};
use crate::viewmodels::{Startup, WorkflowController};
use crate::views::{render_dashboard, render_login, render_signup, render_toasts};

/// Controller del dashboard en el navegador
pub type Dashboard = WorkflowController<ApiClient, LocalTokenStore>;

/// Que parte de la app re-dibujar
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpdateType {
    FullRender,
    /// Solo la capa de toasts (no pisa los inputs de login/signup)
    Toasts,
}

/// Aplicación principal
pub struct App {
    root: Element,
    toast_layer: Element,
    route: Route,
    /// Toasts de login/signup (el dashboard tiene los suyos)
    notices: ReactiveState<Vec<Toast>>,
    dashboard: Option<Rc<Dashboard>>,
    scheduled_dismissals: RefCell<HashSet<Uuid>>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let toast_layer = match get_element_by_id("toast-layer") {
            Some(layer) => layer,
            None => {
                let layer = ElementBuilder::new("div")?
                    .id("toast-layer")?
                    .class("toast-layer")
                    .build();
                let body = document()
                    .and_then(|d| d.body())
                    .ok_or_else(|| JsValue::from_str("No body"))?;
                body.append_child(&layer)?;
                layer
            }
        };

        let notices = ReactiveState::new(Vec::new());
        notices.subscribe(|| schedule(UpdateType::Toasts));

        Ok(Self {
            root,
            toast_layer,
            route: current_route(),
            notices,
            dashboard: None,
            scheduled_dismissals: RefCell::new(HashSet::new()),
        })
    }

    /// Renderizar la ruta actual
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.route = current_route();
        log::debug!("🎬 [APP] render {:?}", self.route);

        let view = match self.route {
            Route::Login => {
                self.dashboard = None;
                render_login(&self.notices)?
            }
            Route::Signup => {
                self.dashboard = None;
                render_signup(&self.notices)?
            }
            Route::Dashboard => match self.mount_dashboard() {
                Some(dashboard) => render_dashboard(&dashboard)?,
                None => return Ok(()),
            },
        };

        set_inner_html(&self.root, "");
        append_child(&self.root, &view)?;
        self.render_toasts()
    }

    /// Crea el controller la primera vez; sin sesion redirige
    fn mount_dashboard(&mut self) -> Option<Rc<Dashboard>> {
        if let Some(dashboard) = &self.dashboard {
            return Some(dashboard.clone());
        }
        match WorkflowController::start(LocalTokenStore, Utc::now(), ApiClient::with_session) {
            Startup::Ready(controller) => {
                let dashboard = Rc::new(controller.with_utc_offset(local_utc_offset()));
                dashboard.state().subscribe(|| schedule(UpdateType::FullRender));
                {
                    let dashboard = dashboard.clone();
                    spawn_local(async move {
                        dashboard.initialize().await;
                    });
                }
                self.dashboard = Some(dashboard.clone());
                Some(dashboard)
            }
            Startup::Redirect(route) => {
                navigate(route);
                None
            }
        }
    }

    /// Dibuja los toasts y agenda su cierre automatico
    pub fn render_toasts(&self) -> Result<(), JsValue> {
        let mut toasts = self.notices.snapshot();
        if let Some(dashboard) = &self.dashboard {
            toasts.extend(dashboard.snapshot().toasts);
        }

        let mut scheduled = self.scheduled_dismissals.borrow_mut();
        for toast in &toasts {
            if scheduled.insert(toast.id) {
                let id = toast.id;
                Timeout::new(CONFIG.ui_config.toast_duration_ms, move || dismiss_toast(id)).forget();
            }
        }
        render_toasts(&self.toast_layer, &toasts, dismiss_toast)
    }

    /// Quita un toast de donde este
    pub fn dismiss(&self, id: Uuid) {
        self.scheduled_dismissals.borrow_mut().remove(&id);
        if self.notices.with(|list| list.iter().any(|t| t.id == id)) {
            self.notices.update(|list| list.retain(|t| t.id != id));
        } else if let Some(dashboard) = &self.dashboard {
            dashboard.dismiss_toast(id);
        }
    }
}

/// Offset local del navegador (getTimezoneOffset va al reves: UTC - local)
fn local_utc_offset() -> FixedOffset {
    let minutes = js_sys::Date::new_0().get_timezone_offset();
    FixedOffset::west_opt((minutes * 60.0) as i32).unwrap_or_else(|| {
        log::warn!("⚠️ [APP] Offset local invalido: {} min, usando UTC", minutes);
        Utc.fix()
    })
}

fn schedule(update_type: UpdateType) {
    Timeout::new(0, move || crate::rerender_app_with_type(update_type)).forget();
}

fn dismiss_toast(id: Uuid) {
    crate::with_app(|app| app.dismiss(id));
}
