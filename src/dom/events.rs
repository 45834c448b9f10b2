// ============================================================================
// EVENT HANDLING - Listeners sobre elementos del DOM
// ============================================================================
// Los listeners de elementos se liberan con el elemento (set_inner_html("")
// o replace_children), por eso `forget()` es seguro aquí. Listeners globales
// (window/document) solo se registran una vez.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, MouseEvent};

fn listen<E, F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(typed) = event.dyn_into::<E>() {
            handler(typed);
        }
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// `change` de selects, inputs de fecha y archivos
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "change", handler)
}

/// `submit` con preventDefault
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |event: Event| {
        event.prevent_default();
        handler();
    })
}

/// dragstart / dragend / dragover / dragleave / drop
pub fn on_drag<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(DragEvent) + 'static,
{
    listen(element, event_type, handler)
}

/// Click en el fondo del overlay (no en su contenido)
pub fn on_backdrop_click<F>(overlay: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let overlay_ref = overlay.clone();
    on_click(overlay, move |event: MouseEvent| {
        let on_backdrop = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|t| t == overlay_ref)
            .unwrap_or(false);
        if on_backdrop {
            handler();
        }
    })
}
