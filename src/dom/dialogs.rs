// ============================================================================
// DIALOGS - alert/confirm del navegador y ventana de impresión
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::window;
use crate::services::ReportDocument;

/// Alerta bloqueante
pub fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

/// Confirmación bloqueante; sin ventana se trata como "cancelar"
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn open_in_new_tab(url: &str) {
    if let Some(w) = window() {
        if let Err(e) = w.open_with_url_and_target(url, "_blank") {
            log::warn!("⚠️ [DOM] No se pudo abrir {}: {:?}", url, e);
        }
    }
}

/// Abrir el reporte en una ventana nueva y lanzar la impresión
pub fn print_report(report: &ReportDocument) -> Result<(), JsValue> {
    let w = window().ok_or_else(|| JsValue::from_str("No window"))?;
    let popup = w
        .open_with_url_and_target("", "_blank")?
        .ok_or_else(|| JsValue::from_str("Pop-up bloqueado pelo navegador"))?;
    let doc = popup
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let root = doc
        .document_element()
        .ok_or_else(|| JsValue::from_str("No document element"))?;
    root.set_inner_html(&report.inner_html());
    doc.set_title(&report.title);
    popup.focus()?;
    popup.print()
}
