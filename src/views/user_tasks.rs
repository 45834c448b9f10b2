// ============================================================================
// USER TASKS VIEW - "Por Usuário": demandas EM_ANDAMENTO por persona
// ============================================================================

use std::rc::Rc;

use chrono::Local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlSelectElement};

use crate::dom::{on_change, on_click, ElementBuilder};
use crate::models::{DateFilter, Demanda};
use crate::state::{AppState, ModalState};
use crate::utils::format_local;
use crate::viewmodels::aggregation::{group_by_assignee, UserColumn};
use crate::viewmodels::loaders::load_user_tasks;
use crate::views::shared::{render_date_filter, render_user_select};

fn reload(state: &AppState) {
    let state = state.clone();
    spawn_local(async move { load_user_tasks(&state).await });
}

fn render_filters(state: &AppState) -> Result<Element, JsValue> {
    let filters = state.views.user_tasks.get_filters();
    let users = state.auth.assignable_users();

    let person = render_user_select("user-tasks-filter-person", &users, filters.usuario.as_deref(), "Todas", |u| {
        u.display_name()
    })?;
    {
        let state = state.clone();
        on_change(&person, move |event: Event| {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .filter(|v| !v.is_empty());
            let mut next = state.views.user_tasks.get_filters();
            next.usuario = value;
            state.views.user_tasks.set_filters(next);
            reload(&state);
        })?;
    }

    let on_apply: Rc<dyn Fn(DateFilter)> = {
        let state = state.clone();
        Rc::new(move |date: DateFilter| {
            let mut next = state.views.user_tasks.get_filters();
            next.date = date;
            state.views.user_tasks.set_filters(next);
            reload(&state);
        })
    };

    Ok(ElementBuilder::new("div")?
        .class("filters-section user-tasks-filters")
        .child(render_date_filter("user-tasks", &filters.date, on_apply)?)?
        .child(person)?
        .build())
}

fn render_task_card(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let previsao = demanda
        .data_previsao
        .map(|p| format_local(&p))
        .unwrap_or_else(|| "-".to_string());
    let meta = ElementBuilder::new("div")?
        .class("user-task-meta")
        .child(ElementBuilder::new("span")?.text(&format!("Criado em: {}", format_local(&demanda.created_at))).build())?
        .child(ElementBuilder::new("span")?.text(&format!("Previsão: {}", previsao)).build())?
        .child(
            ElementBuilder::new("span")?
                .class("user-task-assignee")
                .text(&format!("({})", demanda.criador_nome()))
                .build(),
        )?
        .build();

    let card = ElementBuilder::new("div")?
        .class("user-task-card")
        .data("id", &demanda.id)?
        .child(ElementBuilder::new("div")?.class("user-task-id").text(&demanda.task_code(&Local)).build())?
        .child(ElementBuilder::new("div")?.class("user-task-title").text(&demanda.titulo).build())?
        .child(meta)?
        .build();

    let state = state.clone();
    let demanda = demanda.clone();
    on_click(&card, move |_| state.set_modal(Some(ModalState::detalhes(demanda.clone()))))?;
    Ok(card)
}

fn render_user_column(state: &AppState, column: &UserColumn) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("user-column-header")
        .child(ElementBuilder::new("span")?.class("user-column-name").text(&column.profile.display_name()).build())?
        .child(
            ElementBuilder::new("span")?
                .class("user-column-count")
                .text(&column.demandas.len().to_string())
                .build(),
        )?
        .build();

    let cards = ElementBuilder::new("div")?.class("user-column-cards").build();
    if column.demandas.is_empty() {
        cards.append_child(&ElementBuilder::new("p")?.class("empty-message").text("Nenhuma tarefa pendente.").build())?;
    }
    for demanda in &column.demandas {
        let card = render_task_card(state, demanda)?;
        cards.append_child(&card)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("user-kanban-column")
        .data("user-id", &column.profile.id)?
        .child(header)?
        .child(cards)?
        .build())
}

/// Renderizar "Por Usuário"
pub fn render_user_tasks(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("section")?
        .id("user-tasks-view")?
        .class("user-tasks-view")
        .child(ElementBuilder::new("h2")?.class("view-title").text("Tarefas em andamento por usuário").build())?
        .child(render_filters(state)?)?
        .build();

    let list = &state.views.user_tasks.list;
    if !list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando tarefas...").build())?;
        return Ok(view);
    }

    let users = state.auth.assignable_users();
    let person = state.views.user_tasks.get_filters().usuario;
    let columns = list.with(|demandas| group_by_assignee(&users, demandas, person.as_deref()));

    let container = ElementBuilder::new("div")?
        .id("user-kanban-container")?
        .class("user-kanban-container")
        .build();
    for column in &columns {
        let column_el = render_user_column(state, column)?;
        container.append_child(&column_el)?;
    }
    view.append_child(&container)?;
    Ok(view)
}
