// ============================================================================
// FORM HELPERS - Campos de login/signup
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, event_value, on_event};

/// Valor de un campo, compartido con el handler de submit
pub type FieldValue = Rc<RefCell<String>>;

/// Label + input; el valor se sincroniza en cada `input`
pub fn create_form_group(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
    value: FieldValue,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .id(id)?
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .flag("required", true)?
        .build();

    on_event(&input, "input", move |e| {
        if let Some(v) = event_value(&e) {
            *value.borrow_mut() = v;
        }
    })?;

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

/// Label + select con opciones fijas
pub fn create_select_group(
    id: &str,
    label_text: &str,
    options: &[&str],
    value: FieldValue,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let select = ElementBuilder::new("select")?
        .class("form-input")
        .id(id)?
        .build();

    let current = value.borrow().clone();
    for option in options {
        let node = ElementBuilder::new("option")?
            .attr("value", option)?
            .flag("selected", *option == current)?
            .text(option)
            .build();
        append_child(&select, &node)?;
    }

    on_event(&select, "change", move |e| {
        if let Some(v) = event_value(&e) {
            *value.borrow_mut() = v;
        }
    })?;

    append_child(&group, &label)?;
    append_child(&group, &select)?;
    Ok(group)
}

/// Boton de submit con texto
pub fn create_submit_button(class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class(class)
        .text(text)
        .build())
}

/// Deshabilita/habilita el boton durante el request
pub fn set_busy(button: &Element, busy: bool, text: &str) {
    let result = if busy {
        button.set_attribute("disabled", "")
    } else {
        button.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::error!("❌ [APP] Error cambiando estado del boton: {:?}", e);
    }
    button.set_text_content(Some(text));
}

/// Link a otra ruta hash
pub fn create_route_link(prompt: &str, link_text: &str, href: &str) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .attr("href", href)?
        .class("auth-link")
        .text(link_text)
        .build();
    let footer = ElementBuilder::new("p")?
        .class("auth-footer")
        .text(prompt)
        .build();
    append_child(&footer, &link)?;
    Ok(footer)
}
