// ============================================================================
// DEMANDA CARD - Tarjeta del kanban (arrastrable) + tick del countdown
// ============================================================================

use chrono::{Local, Utc};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, MouseEvent};

use crate::dom::{add_class, on_click, on_drag, query_selector_all, remove_class, ElementBuilder};
use crate::models::{timestamp, Demanda, DemandaStatus};
use crate::state::{AppState, ModalState};
use crate::utils::{format_local, initials};
use crate::viewmodels::countdown::countdown;

const TIMER_SELECTOR: &str = ".demand-card-timer[data-previsao]";

fn info_row(label: &str, value: &str, danger: bool) -> Result<Element, JsValue> {
    let value_el = ElementBuilder::new("span")?
        .class_if("text-danger", danger)?
        .text(value)
        .build();
    Ok(ElementBuilder::new("div")?
        .class("info-row")
        .child(ElementBuilder::new("span")?.class("info-label").text(label).build())?
        .child(value_el)?
        .build())
}

/// Bloque del timer; el tick lo actualiza en su sitio
pub fn render_timer(demanda: &Demanda) -> Result<Element, JsValue> {
    let cd = countdown(demanda.data_previsao, demanda.status, Utc::now());
    let timer = ElementBuilder::new("div")?
        .class(cd.timer_class())
        .data("status", demanda.status.as_str())?
        .text(&cd.text)
        .build();
    if let Some(previsao) = demanda.data_previsao {
        timer.set_attribute("data-previsao", &previsao.to_rfc3339())?;
    }
    Ok(timer)
}

/// Recalcular todos los timers visibles
pub fn tick_timers() -> Result<(), JsValue> {
    let now = Utc::now();
    for timer in query_selector_all(TIMER_SELECTOR)? {
        let deadline = timer.get_attribute("data-previsao").and_then(|raw| timestamp::parse(&raw));
        let status = timer
            .get_attribute("data-status")
            .and_then(|tag| DemandaStatus::from_tag(&tag))
            .unwrap_or_default();
        let cd = countdown(deadline, status, now);
        timer.set_class_name(cd.timer_class());
        timer.set_text_content(Some(&cd.text));
    }
    Ok(())
}

/// Renderizar tarjeta
pub fn render_demanda_card(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let now = Utc::now();
    let expired = demanda.is_overdue(now);
    let previsao = demanda
        .data_previsao
        .map(|p| format_local(&p))
        .unwrap_or_else(|| "-".to_string());

    let atribuido = demanda.atribuido_nome();
    let footer = ElementBuilder::new("div")?
        .class("demand-card-footer")
        .child(
            ElementBuilder::new("span")?
                .class("requester-name")
                .text(&format!("({})", demanda.criador_nome()))
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("user-avatar")
                .attr("title", &atribuido)?
                .text(&initials(&atribuido))
                .build(),
        )?
        .build();

    if demanda.status.can_start() {
        let start = ElementBuilder::new("button")?
            .class("btn btn-primary btn-sm btn-iniciar")
            .attr("type", "button")?
            .text("Iniciar ›")
            .build();
        let state = state.clone();
        let id = demanda.id.clone();
        let titulo = demanda.titulo.clone();
        on_click(&start, move |event: MouseEvent| {
            event.stop_propagation();
            state.set_modal(Some(ModalState::ConfirmarInicio { id: id.clone(), titulo: titulo.clone() }));
        })?;
        footer.append_child(&start)?;
    }

    let card = ElementBuilder::new("div")?
        .class("demand-card")
        .attr("draggable", "true")?
        .data("id", &demanda.id)?
        .child(ElementBuilder::new("div")?.class("demand-card-id").text(&demanda.task_code(&Local)).build())?
        .child(ElementBuilder::new("div")?.class("demand-card-title").text(&demanda.titulo).build())?
        .child(info_row("Criado:", &format_local(&demanda.created_at), false)?)?
        .child(info_row("Previsão:", &previsao, expired)?)?
        .child(info_row("Tempo Estimado:", &demanda.horas_label(), false)?)?
        .child(render_timer(demanda)?)?
        .child(footer)?
        .build();

    {
        let state = state.clone();
        let demanda = demanda.clone();
        on_click(&card, move |_| state.set_modal(Some(ModalState::detalhes(demanda.clone()))))?;
    }
    {
        let state = state.clone();
        let id = demanda.id.clone();
        let card_ref = card.clone();
        on_drag(&card, "dragstart", move |event: DragEvent| {
            if let Some(transfer) = event.data_transfer() {
                let _ = transfer.set_data("text/plain", &id);
            }
            state.kanban.set_dragging(Some(id.clone()));
            let _ = add_class(&card_ref, "dragging");
        })?;
    }
    {
        let card_ref = card.clone();
        on_drag(&card, "dragend", move |_| {
            let _ = remove_class(&card_ref, "dragging");
        })?;
    }

    Ok(card)
}
