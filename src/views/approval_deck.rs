// ============================================================================
// APPROVAL DECK VIEW - Demandas PARA_APROVACAO con Aprovar / Revisar
// ============================================================================

use chrono::Local;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{button, on_click, ElementBuilder};
use crate::models::{Demanda, DemandaStatus};
use crate::state::{AppState, ModalState};
use crate::utils::format_local;
use crate::views::shared::spawn_write;

fn decision_button(state: &AppState, class: &str, label: &str, id: &str, target: DemandaStatus) -> Result<Element, JsValue> {
    let btn = button(class, label)?;
    let state = state.clone();
    let id = id.to_string();
    on_click(&btn, move |event: MouseEvent| {
        event.stop_propagation();
        let id = id.clone();
        spawn_write(&state, None, move |vm| async move { vm.update_status(&id, target).await });
    })?;
    Ok(btn)
}

fn render_card(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let enviado = demanda.updated_at.unwrap_or(demanda.created_at);
    let descricao = demanda.descricao.as_deref().unwrap_or("Sem descrição");

    let actions = ElementBuilder::new("div")?
        .class("approval-card-actions")
        .child(decision_button(state, "btn btn-secondary", "Revisar", &demanda.id, DemandaStatus::EmRevisao)?)?
        .child(decision_button(state, "btn btn-primary", "Aprovar", &demanda.id, DemandaStatus::Aprovado)?)?
        .build();

    let card = ElementBuilder::new("div")?
        .class("approval-card")
        .data("id", &demanda.id)?
        .child(ElementBuilder::new("div")?.class("approval-card-id").text(&demanda.task_code(&Local)).build())?
        .child(ElementBuilder::new("div")?.class("approval-card-title").text(&demanda.titulo).build())?
        .child(ElementBuilder::new("p")?.class("approval-card-description").text(descricao).build())?
        .child(
            ElementBuilder::new("div")?
                .class("approval-card-meta")
                .child(ElementBuilder::new("span")?.text(&format!("Responsável: {}", demanda.atribuido_nome())).build())?
                .child(ElementBuilder::new("span")?.text(&format!("Solicitante: {}", demanda.criador_nome())).build())?
                .child(ElementBuilder::new("span")?.text(&format!("Enviado: {}", format_local(&enviado))).build())?
                .build(),
        )?
        .child(actions)?
        .build();

    let state = state.clone();
    let demanda = demanda.clone();
    on_click(&card, move |_| state.set_modal(Some(ModalState::detalhes(demanda.clone()))))?;
    Ok(card)
}

/// Renderizar deck de aprovação
pub fn render_approval_deck(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("section")?
        .id("approval-deck-section")?
        .class("approval-deck-view")
        .child(ElementBuilder::new("h2")?.class("view-title").text("Deck de Aprovação").build())?
        .build();

    let list = &state.views.approval.list;
    if !list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando demandas...").build())?;
        return Ok(view);
    }

    let deck = ElementBuilder::new("div")?.class("approval-deck").build();
    let demandas = list.get();
    if demandas.is_empty() {
        deck.append_child(
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("Nenhuma demanda aguardando aprovação.")
                .build(),
        )?;
    }
    for demanda in &demandas {
        let card = render_card(state, demanda)?;
        deck.append_child(&card)?;
    }
    view.append_child(&deck)?;
    Ok(view)
}
