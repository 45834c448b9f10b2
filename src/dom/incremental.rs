// ============================================================================
// INCREMENTAL DOM UPDATES - Repintar solo una región de la app
// ============================================================================
// La raíz `#app` tiene tres regiones fijas; cada actualización reemplaza los
// hijos de una sola región.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{get_element_by_id, ElementBuilder};
use crate::state::IncrementalUpdate;

pub const REGION_HEADER: &str = "app-header";
pub const REGION_CONTENT: &str = "app-content";
pub const REGION_MODAL: &str = "modal-root";

pub fn region_id(region: IncrementalUpdate) -> &'static str {
    match region {
        IncrementalUpdate::Header => REGION_HEADER,
        IncrementalUpdate::Content => REGION_CONTENT,
        IncrementalUpdate::Modal => REGION_MODAL,
    }
}

/// Esqueleto `#app > header + main + modal-root`
pub fn build_shell() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(ElementBuilder::new("header")?.id(REGION_HEADER)?.class("app-header").build())?
        .child(ElementBuilder::new("main")?.id(REGION_CONTENT)?.class("app-content").build())?
        .child(ElementBuilder::new("div")?.id(REGION_MODAL)?.build())?
        .build())
}

/// Reemplazar el contenido de una región (None = vaciarla)
pub fn replace_region(region: IncrementalUpdate, content: Option<Element>) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id(region_id(region)) else {
        log::warn!("⚠️ [DOM] Región #{} no encontrada", region_id(region));
        return Ok(());
    };
    container.set_inner_html("");
    if let Some(content) = content {
        container.append_child(&content)?;
    }
    Ok(())
}
