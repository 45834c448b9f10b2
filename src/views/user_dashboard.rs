// ============================================================================
// USER DASHBOARD VIEW - "Meu Painel": contadores y últimas demandas propias
// ============================================================================

use chrono::Datelike;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{button, field_value, form_group, on_click, option, ElementBuilder};
use crate::models::{DashboardFilters, Demanda};
use crate::state::{AppState, ModalState};
use crate::utils::{format_local, parse_date_input, to_date_input, today, MESES};
use crate::viewmodels::aggregation::{recent, StatusTally};
use crate::viewmodels::loaders::load_dashboard;

fn current_filters(state: &AppState) -> DashboardFilters {
    state
        .views
        .dashboard
        .get_filters()
        .unwrap_or_else(|| DashboardFilters::for_today(today()))
}

fn read_filters(current: &DashboardFilters) -> DashboardFilters {
    DashboardFilters {
        day: field_value("dashboard-filter-day").and_then(|v| parse_date_input(&v)),
        month: field_value("dashboard-filter-month")
            .and_then(|v| v.parse().ok())
            .unwrap_or(current.month),
        year: field_value("dashboard-filter-year")
            .and_then(|v| v.parse().ok())
            .unwrap_or(current.year),
    }
}

fn render_filters(state: &AppState, filters: &DashboardFilters) -> Result<Element, JsValue> {
    let day = ElementBuilder::new("input")?
        .id("dashboard-filter-day")?
        .class("form-control")
        .attr("type", "date")?
        .attr("value", &filters.day.map(to_date_input).unwrap_or_default())?
        .build();

    let month = ElementBuilder::new("select")?.id("dashboard-filter-month")?.class("form-control").build();
    let opt = option("0", "Todos", filters.month == 0)?;
    month.append_child(&opt)?;
    for (index, name) in MESES.iter().enumerate() {
        let value = index as u32 + 1;
        let opt = option(&value.to_string(), name, value == filters.month)?;
        month.append_child(&opt)?;
    }

    let year = ElementBuilder::new("select")?.id("dashboard-filter-year")?.class("form-control").build();
    let this_year = today().year();
    for y in (this_year - 2)..=(this_year + 1) {
        let opt = option(&y.to_string(), &y.to_string(), y == filters.year)?;
        year.append_child(&opt)?;
    }

    let filtrar = button("btn btn-primary", "Filtrar")?;
    {
        let state = state.clone();
        on_click(&filtrar, move |_| {
            let next = read_filters(&current_filters(&state));
            state.views.dashboard.set_filters(next);
            let state = state.clone();
            spawn_local(async move { load_dashboard(&state).await });
        })?;
    }

    let pdf = button("btn btn-secondary", "📄 Gerar PDF")?;
    {
        let state = state.clone();
        on_click(&pdf, move |_| state.set_modal(Some(ModalState::PdfDashboard)))?;
    }

    Ok(ElementBuilder::new("div")?
        .class("filters-section dashboard-filters")
        .child(form_group("Dia", "dashboard-filter-day", day)?)?
        .child(form_group("Mês", "dashboard-filter-month", month)?)?
        .child(form_group("Ano", "dashboard-filter-year", year)?)?
        .child(filtrar)?
        .child(pdf)?
        .build())
}

fn stat_card(id: &str, label: &str, value: usize) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("stat-card")
        .child(ElementBuilder::new("span")?.id(id)?.class("stat-value").text(&value.to_string()).build())?
        .child(ElementBuilder::new("span")?.class("stat-label").text(label).build())?
        .build())
}

fn render_stats(tally: &StatusTally) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("dashboard-stats")
        .child(stat_card("stat-total", "Total", tally.total)?)?
        .child(stat_card("stat-afazer", "A Fazer", tally.a_fazer)?)?
        .child(stat_card("stat-andamento", "Em Andamento", tally.em_andamento)?)?
        .child(stat_card("stat-concluidas", "Concluídas", tally.concluidas)?)?
        .build())
}

fn render_item(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let main = ElementBuilder::new("div")?
        .class("demand-item-main")
        .child(ElementBuilder::new("span")?.class("demand-item-title").text(&demanda.titulo).build())?
        .child(
            ElementBuilder::new("span")?
                .class(&format!("demand-item-status status-{}", demanda.status.css_suffix()))
                .text(demanda.status.label())
                .build(),
        )?
        .build();
    let meta = ElementBuilder::new("div")?
        .class("demand-item-meta")
        .child(ElementBuilder::new("span")?.text(&format!("Criado: {}", format_local(&demanda.created_at))).build())?
        .child(ElementBuilder::new("span")?.text(&format!("Por: {}", demanda.criador_nome())).build())?
        .build();

    let item = ElementBuilder::new("div")?
        .class("demand-item")
        .data("id", &demanda.id)?
        .child(main)?
        .child(meta)?
        .build();

    let state = state.clone();
    let demanda = demanda.clone();
    on_click(&item, move |_| state.set_modal(Some(ModalState::detalhes(demanda.clone()))))?;
    Ok(item)
}

/// Renderizar "Meu Painel"
pub fn render_user_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let filters = current_filters(state);
    let view = ElementBuilder::new("section")?
        .id("user-dashboard-section")?
        .class("user-dashboard-view")
        .child(ElementBuilder::new("h2")?.class("view-title").text("Meu Painel").build())?
        .child(render_filters(state, &filters)?)?
        .build();

    let list = &state.views.dashboard.list;
    if !list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando painel...").build())?;
        return Ok(view);
    }

    let demandas = list.get();
    let stats = render_stats(&StatusTally::of(&demandas))?;
    view.append_child(&stats)?;

    let container = ElementBuilder::new("div")?
        .id("dashboard-demands-list")?
        .class("dashboard-demands-list")
        .build();
    let latest = recent(&demandas, CONFIG.demanda_config.dashboard_recent_limit);
    if latest.is_empty() {
        container.append_child(
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("Nenhuma demanda encontrada para o período selecionado.")
                .build(),
        )?;
    }
    for demanda in latest {
        let item = render_item(state, demanda)?;
        container.append_child(&item)?;
    }

    view.append_child(&ElementBuilder::new("h3")?.text("Demandas recentes").build())?;
    view.append_child(&container)?;
    Ok(view)
}
