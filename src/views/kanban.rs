// ============================================================================
// KANBAN VIEW - Tablero personal con drag & drop
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Element};

use crate::config::CONFIG;
use crate::dom::{add_class, closest, on_click, on_drag, remove_class, ElementBuilder};
use crate::models::{DateFilter, DemandaStatus};
use crate::state::{AppState, IncrementalUpdate};
use crate::viewmodels::board::{build_board, BoardColumn, BoardLane};
use crate::viewmodels::permissions::RoleVisibility;
use crate::viewmodels::DemandaViewModel;
use crate::views::demanda_card::{render_demanda_card, tick_timers};
use crate::views::shared::{render_date_filter, spawn_write};

fn reload(state: &AppState) {
    let state = state.clone();
    spawn_local(async move {
        DemandaViewModel::new(&state).load_kanban().await;
    });
}

/// Reiniciar el countdown del tablero (el anterior se cancela)
pub fn start_board_timer(state: &AppState) {
    state.board_timer.borrow_mut().start(CONFIG.timer_config.countdown_tick_ms, || {
        if let Err(e) = tick_timers() {
            log::warn!("⚠️ [KANBAN] Error actualizando timers: {:?}", e);
        }
    });
}

fn render_filters(state: &AppState) -> Result<Element, JsValue> {
    let filters = state.kanban.get_filters();

    let on_apply: Rc<dyn Fn(DateFilter)> = {
        let state = state.clone();
        Rc::new(move |date: DateFilter| {
            let mut next = state.kanban.get_filters();
            next.date = date;
            state.kanban.set_filters(next);
            reload(&state);
        })
    };

    let clear = ElementBuilder::new("button")?
        .class("btn btn-secondary btn-sm")
        .attr("type", "button")?
        .text("Limpar filtros")
        .build();
    {
        let state = state.clone();
        on_click(&clear, move |_| {
            state.kanban.set_filters(Default::default());
            reload(&state);
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .id("filters-section")?
        .class("filters-section")
        .child(render_date_filter("kanban", &filters.date, on_apply)?)?
        .child(clear)?
        .build())
}

fn render_lane(state: &AppState, lane: &BoardLane, hidden: bool) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("kanban-cards")
        .class_if("hidden", hidden)?
        .id(&format!("cards-{}", lane.status.as_str()))?
        .data("status", lane.status.as_str())?
        .build();

    if lane.cards.is_empty() {
        container.append_child(&ElementBuilder::new("p")?.class("empty-message").text(lane.empty_message()).build())?;
    }
    for demanda in &lane.cards {
        let card = render_demanda_card(state, demanda)?;
        container.append_child(&card)?;
    }

    wire_drop_target(state, &container, lane.status)?;
    Ok(container)
}

/// Soltar una tarjeta en una sub-lista cambia su estado
fn wire_drop_target(state: &AppState, container: &Element, status: DemandaStatus) -> Result<(), JsValue> {
    let column_of = |el: &Element| closest(el, ".kanban-column");

    {
        let target = container.clone();
        on_drag(container, "dragover", move |event: DragEvent| {
            event.prevent_default();
            if let Some(column) = column_of(&target) {
                let _ = add_class(&column, "drag-over");
            }
        })?;
    }
    {
        let target = container.clone();
        on_drag(container, "dragleave", move |_| {
            if let Some(column) = column_of(&target) {
                let _ = remove_class(&column, "drag-over");
            }
        })?;
    }

    let state = state.clone();
    let target = container.clone();
    on_drag(container, "drop", move |event: DragEvent| {
        event.prevent_default();
        if let Some(column) = column_of(&target) {
            let _ = remove_class(&column, "drag-over");
        }
        let Some(id) = state.kanban.take_dragging() else { return };
        if state.kanban.find(&id).map(|d| d.status) == Some(status) {
            return;
        }
        spawn_write(&state, None, move |vm| async move { vm.update_status(&id, status).await });
    })
}

fn render_column(state: &AppState, column: &BoardColumn) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("column-header")
        .child(ElementBuilder::new("h3")?.text(column.title()).build())?
        .child(ElementBuilder::new("span")?.class("column-count").text(&column.count().to_string()).build())?
        .build();

    let el = ElementBuilder::new("div")?
        .class(&format!("kanban-column column-{}", column.status.css_suffix()))
        .data("status", column.status.as_str())?
        .child(header)?
        .build();

    let todo_lane = state.kanban.get_todo_lane();
    if column.lanes.len() > 1 {
        let tabs = ElementBuilder::new("div")?.class("column-tabs").build();
        for (label, key, lane) in [("A Fazer", "a-fazer", DemandaStatus::AFazer), ("Fixos", "fixos", DemandaStatus::Fixo)] {
            let tab = ElementBuilder::new("button")?
                .class("column-tab")
                .class_if("active", todo_lane == lane)?
                .attr("type", "button")?
                .data("subtab", key)?
                .text(label)
                .build();
            let state = state.clone();
            on_click(&tab, move |_| {
                state.kanban.set_todo_lane(lane);
                state.notify(IncrementalUpdate::Content);
            })?;
            tabs.append_child(&tab)?;
        }
        el.append_child(&tabs)?;
    }

    for lane in &column.lanes {
        let hidden = column.lanes.len() > 1 && lane.status != todo_lane;
        let lane_el = render_lane(state, lane, hidden)?;
        el.append_child(&lane_el)?;
    }
    Ok(el)
}

/// Renderizar kanban
pub fn render_kanban(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("section")?.class("kanban-view").build();

    if RoleVisibility::for_profile(state.auth.get_profile().as_ref()).filters_panel {
        let filters = render_filters(state)?;
        view.append_child(&filters)?;
    }

    if !state.kanban.list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando demandas...").build())?;
        return Ok(view);
    }

    let board = ElementBuilder::new("div")?.class("kanban-board").build();
    let columns = state.kanban.list.with(build_board);
    for column in &columns {
        let column_el = render_column(state, column)?;
        board.append_child(&column_el)?;
    }
    view.append_child(&board)?;

    start_board_timer(state);
    Ok(view)
}
