// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::create_element;

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

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    /// Agregar una clase solo si `on`
    pub fn class_if(self, class: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.class_list().add_1(class)?;
        }
        Ok(self)
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        self.element.set_attribute("id", id)?;
        Ok(self)
    }

    /// Establecer text content (escapado por el navegador)
    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    /// Establecer inner HTML (el llamador escapa lo que venga del usuario)
    pub fn html(self, html: &str) -> Self {
        self.element.set_inner_html(html);
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        self.element.append_child(&child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            self.element.append_child(&child)?;
        }
        Ok(self)
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    /// Atributo booleano (`disabled`, `required`, `selected`...)
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.set_attribute(name, "")?;
        }
        Ok(self)
    }

    /// `data-{key}`
    pub fn data(self, key: &str, value: &str) -> Result<Self, JsValue> {
        self.attr(&format!("data-{}", key), value)
    }

    /// Construir y retornar elemento
    pub fn build(self) -> Element {
        self.element
    }
}

/// `<option value=..>label</option>`
pub fn option(value: &str, label: &str, selected: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("option")?
        .attr("value", value)?
        .flag("selected", selected)?
        .text(label)
        .build())
}

/// `<button type="button" class="..">`
pub fn button(class: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text(label)
        .build())
}

/// Grupo `<div class="form-group"><label for=..>..</label>{control}</div>`
pub fn form_group(label: &str, for_id: &str, control: Element) -> Result<Element, JsValue> {
    let label_el = ElementBuilder::new("label")?
        .attr("for", for_id)?
        .text(label)
        .build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(label_el)?
        .child(control)?
        .build())
}
