// ============================================================================
// CRONOGRAMA VIEW - Entregas de una persona por día del mes
// ============================================================================

use chrono::{Datelike, Local};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{button, field_value, form_group, on_click, option, ElementBuilder};
use crate::models::{CronogramaFilters, CronogramaStatusFilter, Demanda, DemandaStatus};
use crate::state::{AppState, ModalState};
use crate::utils::{format_local, today, MESES};
use crate::viewmodels::aggregation::{group_by_day, DayGroup};
use crate::viewmodels::loaders::{cronograma_defaults, load_cronograma};

const STATUS_OPTIONS: [(CronogramaStatusFilter, &str); 3] = [
    (CronogramaStatusFilter::Aprovado, "Aprovado"),
    (CronogramaStatusFilter::EmAndamento, "Em Andamento"),
    (CronogramaStatusFilter::Todos, "Todos"),
];

fn current_filters(state: &AppState) -> CronogramaFilters {
    state
        .views
        .cronograma
        .get_filters()
        .unwrap_or_else(|| cronograma_defaults(&state.auth.assignable_users(), today()))
}

/// Filtros escritos en los selects (los ausentes conservan el valor actual)
fn read_filters(current: &CronogramaFilters) -> CronogramaFilters {
    CronogramaFilters {
        usuario: field_value("cronograma-filter-user")
            .filter(|v| !v.is_empty())
            .or_else(|| current.usuario.clone()),
        month: field_value("cronograma-filter-month")
            .and_then(|v| v.parse().ok())
            .unwrap_or(current.month),
        year: field_value("cronograma-filter-year")
            .and_then(|v| v.parse().ok())
            .unwrap_or(current.year),
        status: field_value("cronograma-filter-status")
            .map(|v| CronogramaStatusFilter::from_value(&v))
            .unwrap_or(current.status),
    }
}

fn select(id: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("select")?.id(id)?.class("form-control").build())
}

fn render_filters(state: &AppState, filters: &CronogramaFilters) -> Result<Element, JsValue> {
    // Sin opción "Todos": siempre una persona concreta
    let user = select("cronograma-filter-user")?;
    for profile in state.auth.assignable_users() {
        let selected = filters.usuario.as_deref() == Some(profile.id.as_str());
        let opt = option(&profile.id, &profile.display_name(), selected)?;
        user.append_child(&opt)?;
    }

    let month = select("cronograma-filter-month")?;
    for (index, name) in MESES.iter().enumerate() {
        let value = index as u32 + 1;
        let opt = option(&value.to_string(), name, value == filters.month)?;
        month.append_child(&opt)?;
    }

    let year = select("cronograma-filter-year")?;
    let this_year = today().year();
    for y in (this_year - 2)..=(this_year + 1) {
        let opt = option(&y.to_string(), &y.to_string(), y == filters.year)?;
        year.append_child(&opt)?;
    }

    let status = select("cronograma-filter-status")?;
    for (value, label) in STATUS_OPTIONS {
        let opt = option(value.as_str(), label, value == filters.status)?;
        status.append_child(&opt)?;
    }

    let filtrar = button("btn btn-primary", "Filtrar")?;
    {
        let state = state.clone();
        on_click(&filtrar, move |_| {
            let next = read_filters(&current_filters(&state));
            state.views.cronograma.set_filters(next);
            let state = state.clone();
            spawn_local(async move { load_cronograma(&state).await });
        })?;
    }

    let pdf = button("btn btn-secondary", "📄 Gerar PDF")?;
    {
        let state = state.clone();
        on_click(&pdf, move |_| state.set_modal(Some(ModalState::PdfCronograma)))?;
    }

    Ok(ElementBuilder::new("div")?
        .class("filters-section cronograma-filters")
        .child(form_group("Usuário", "cronograma-filter-user", user)?)?
        .child(form_group("Mês", "cronograma-filter-month", month)?)?
        .child(form_group("Ano", "cronograma-filter-year", year)?)?
        .child(form_group("Status", "cronograma-filter-status", status)?)?
        .child(filtrar)?
        .child(pdf)?
        .build())
}

fn render_card(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let andamento = demanda.status == DemandaStatus::EmAndamento;
    let previsao = demanda
        .data_previsao
        .map(|p| format_local(&p))
        .unwrap_or_else(|| "-".to_string());

    let footer = ElementBuilder::new("div")?
        .class("cronograma-card-footer")
        .child(ElementBuilder::new("span")?.class("cronograma-card-user").text(&demanda.atribuido_nome()).build())?
        .build();
    if andamento {
        footer.append_child(&ElementBuilder::new("span")?.class("cronograma-card-status").text("Em Andamento").build())?;
    }

    let card = ElementBuilder::new("div")?
        .class("cronograma-card")
        .class_if("andamento", andamento)?
        .data("id", &demanda.id)?
        .child(ElementBuilder::new("div")?.class("cronograma-card-id").text(&demanda.task_code(&Local)).build())?
        .child(ElementBuilder::new("div")?.class("cronograma-card-title").text(&demanda.titulo).build())?
        .child(
            ElementBuilder::new("div")?
                .class("cronograma-card-info")
                .child(ElementBuilder::new("span")?.text(&format!("Criado: {}", format_local(&demanda.created_at))).build())?
                .child(ElementBuilder::new("span")?.text(&format!("Previsão: {}", previsao)).build())?
                .build(),
        )?
        .child(footer)?
        .build();

    let state = state.clone();
    let demanda = demanda.clone();
    on_click(&card, move |_| state.set_modal(Some(ModalState::detalhes(demanda.clone()))))?;
    Ok(card)
}

fn render_day(state: &AppState, group: &DayGroup) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("cronograma-day-header")
        .child(ElementBuilder::new("span")?.class("cronograma-day-number").text(&group.header()).build())?
        .child(ElementBuilder::new("span")?.class("cronograma-day-name").text(&format!("({})", group.weekday)).build())?
        .child(
            ElementBuilder::new("span")?
                .class("cronograma-day-count")
                .text(&group.demandas.len().to_string())
                .build(),
        )?
        .build();

    let cards = ElementBuilder::new("div")?.class("cronograma-day-cards").build();
    for demanda in &group.demandas {
        let card = render_card(state, demanda)?;
        cards.append_child(&card)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("cronograma-day-column")
        .child(header)?
        .child(cards)?
        .build())
}

/// Renderizar cronograma
pub fn render_cronograma(state: &AppState) -> Result<Element, JsValue> {
    let filters = current_filters(state);
    let view = ElementBuilder::new("section")?
        .id("cronograma-section")?
        .class("cronograma-view")
        .child(ElementBuilder::new("h2")?.class("view-title").text("Cronograma de Entregas").build())?
        .child(render_filters(state, &filters)?)?
        .build();

    let list = &state.views.cronograma.list;
    if !list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando cronograma...").build())?;
        return Ok(view);
    }

    let groups = list.with(|demandas| group_by_day(demandas, filters.year, filters.month, &Local));
    let board = ElementBuilder::new("div")?
        .id("cronograma-kanban")?
        .class("cronograma-kanban")
        .build();
    if groups.is_empty() {
        board.append_child(
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("Nenhuma demanda encontrada para o período selecionado.")
                .build(),
        )?;
    }
    for group in &groups {
        let day = render_day(state, group)?;
        board.append_child(&day)?;
    }
    view.append_child(&board)?;
    Ok(view)
}
