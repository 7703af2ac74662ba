// ============================================================================
// TOASTS VIEW - Capa de notificaciones
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, set_inner_html};
use crate::state::{Toast, ToastTone};

/// Re-dibuja la capa; `on_dismiss` se llama al tocar un toast
pub fn render_toasts(layer: &Element, toasts: &[Toast], on_dismiss: fn(uuid::Uuid)) -> Result<(), JsValue> {
    set_inner_html(layer, "");
    for toast in toasts {
        let class = match toast.tone {
            ToastTone::Success => "toast toast-success",
            ToastTone::Error => "toast toast-error",
        };
        let item = ElementBuilder::new("div")?
            .class(class)
            .attr("role", "status")?
            .text(&toast.message)
            .build();
        let id = toast.id;
        on_click(&item, move |_| on_dismiss(id))?;
        append_child(layer, &item)?;
    }
    Ok(())
}
