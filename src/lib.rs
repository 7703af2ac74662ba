// ============================================================================
// SHOULD I BUNK? - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Flujo de evaluacion (scan -> contexto -> veredicto -> historial)
// - Services: SOLO comunicación API + persistencia del token
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
//
// Todo lo que no toca el navegador compila y se testea en el host.
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;
#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::*;

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;
    use crate::app::{App, UpdateType};
    use crate::config::CONFIG;
    use crate::dom::on_window_event;

    // Variable estática global para mantener la instancia de App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 Should I Bunk? - Rust + WASM");

        let mut app = App::new()?;
        app.render()?;

        APP.with(|app_cell| {
            *app_cell.borrow_mut() = Some(app);
        });

        // Listener global: se registra UNA VEZ aqui
        on_window_event("hashchange", |_e| {
            log::info!("🧭 [APP] hashchange");
            rerender_app();
        })?;

        Ok(())
    }

    /// Re-render completo de la ruta actual
    pub fn rerender_app() {
        rerender_app_with_type(UpdateType::FullRender);
    }

    /// Re-render con tipo específico
    pub fn rerender_app_with_type(update_type: UpdateType) {
        APP.with(|app_cell| {
            let Ok(mut slot) = app_cell.try_borrow_mut() else {
                log::warn!("⚠️ [RERENDER] App ocupada, se omite {:?}", update_type);
                return;
            };
            let Some(app) = slot.as_mut() else {
                log::warn!("⚠️ [RERENDER] App no está inicializada");
                return;
            };
            let result = match update_type {
                UpdateType::FullRender => app.render(),
                UpdateType::Toasts => app.render_toasts(),
            };
            if let Err(e) = result {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        });
    }

    /// Acceso de solo lectura a la App (timers de toasts)
    pub(crate) fn with_app(f: impl FnOnce(&App)) {
        APP.with(|app_cell| {
            if let Ok(slot) = app_cell.try_borrow() {
                if let Some(app) = slot.as_ref() {
                    f(app);
                }
            }
        });
    }

    /// Re-render llamable desde JavaScript
    #[wasm_bindgen]
    pub fn rerender_app_wasm() {
        rerender_app();
    }
}
