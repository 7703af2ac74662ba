// ============================================================================
// ELEMENT BUILDER - Builder para las vistas HTML y el grafico SVG
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{create_element, create_svg_element, set_class_name, set_text_content, append_child, set_attribute};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// Crear nuevo builder para un elemento
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Builder para elementos SVG (grafico de asistencia)
    pub fn svg(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_svg_element(tag)?,
        })
    }

    /// Establecer class name (reemplaza todas las clases)
    ///
    /// En SVG `className` es de solo lectura, asi que va por atributo.
    pub fn class(self, class: &str) -> Self {
        if self.element.namespace_uri().as_deref() == Some("http://www.w3.org/2000/svg") {
            if let Err(e) = set_attribute(&self.element, "class", class) {
                log::error!("❌ [APP] Error asignando class SVG '{}': {:?}", class, e);
            }
        } else {
            set_class_name(&self.element, class);
        }
        self
    }

    /// Establecer ID
    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    /// Establecer text content
    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    /// Agregar hijo
    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    /// Establecer atributo
    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Atributo booleano (`disabled`, `selected`, ...) solo si `on`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            set_attribute(&self.element, name, "")?;
        }
        Ok(self)
    }

    /// Coordenada numerica del grafico, con un decimal
    pub fn num(self, name: &str, value: f64) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, &format!("{:.1}", value))?;
        Ok(self)
    }

    /// Construir y retornar elemento
    pub fn build(self) -> Element {
        self.element
    }
}
