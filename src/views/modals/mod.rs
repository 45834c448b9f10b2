// ============================================================================
// MODALS - Capa de modales (como mucho uno abierto)
// ============================================================================

mod acciones;
mod detalhes;
mod funcionario;
mod nova_demanda;
mod relatorios;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{button, on_backdrop_click, on_click, ElementBuilder};
use crate::state::{AppState, ModalState};

/// Overlay + caja con cabecera y botón de cierre
pub(crate) fn modal_frame(state: &AppState, id: &str, title: &str, body: Element) -> Result<Element, JsValue> {
    let close = ElementBuilder::new("button")?
        .class("modal-close")
        .attr("type", "button")?
        .attr("aria-label", "Fechar")?
        .text("×")
        .build();
    {
        let state = state.clone();
        on_click(&close, move |_| state.back_modal())?;
    }

    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(close)?
        .build();

    let content = ElementBuilder::new("div")?
        .class("modal-content")
        .child(header)?
        .child(body)?
        .build();

    let overlay = ElementBuilder::new("div")?
        .id(id)?
        .class("modal")
        .child(content)?
        .build();
    let state = state.clone();
    on_backdrop_click(&overlay, move || state.close_modal())?;
    Ok(overlay)
}

/// Botón "Cancelar": vuelve al modal padre o cierra
pub(crate) fn cancel_button(state: &AppState) -> Result<Element, JsValue> {
    let cancel = button("btn btn-secondary", "Cancelar")?;
    let state = state.clone();
    on_click(&cancel, move |_| state.back_modal())?;
    Ok(cancel)
}

/// `<input class="form-control">` con valor inicial
pub(crate) fn input(id: &str, kind: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .id(id)?
        .class("form-control")
        .attr("type", kind)?
        .attr("value", value)?
        .build())
}

/// Fila de botones al pie del formulario
pub(crate) fn form_actions(buttons: Vec<Element>) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?.class("form-actions").children(buttons).map(|b| b.build())
}

/// Renderizar el modal activo (None = capa vacía)
pub fn render_modal(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(modal) = state.get_modal() else {
        return Ok(None);
    };
    let el = match modal {
        ModalState::NovaDemanda => nova_demanda::render(state)?,
        ModalState::Detalhes { demanda, tab } => detalhes::render(state, &demanda, tab)?,
        ModalState::Editar(demanda) => acciones::render_editar(state, &demanda)?,
        ModalState::Delegar(demanda) => acciones::render_delegar(state, &demanda)?,
        ModalState::ConfirmarInicio { id, titulo } => acciones::render_confirmar_inicio(state, &id, &titulo)?,
        ModalState::PdfCronograma => relatorios::render_pdf_cronograma(state)?,
        ModalState::PdfDashboard => relatorios::render_pdf_dashboard(state)?,
        ModalState::NovoFuncionario => funcionario::render_novo(state)?,
        ModalState::EditarCargo(profile) => funcionario::render_editar_cargo(state, &profile)?,
    };
    Ok(Some(el))
}
