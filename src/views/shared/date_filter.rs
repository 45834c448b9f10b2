// ============================================================================
// DATE FILTER - Botones todos / hoje / ontem / período + rango
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{field_value, on_change, on_click, ElementBuilder};
use crate::models::{DateFilter, DateFilterMode};
use crate::utils::{parse_date_input, to_date_input};

const MODES: [(DateFilterMode, &str); 4] = [
    (DateFilterMode::Todos, "Todos"),
    (DateFilterMode::Hoje, "Hoje"),
    (DateFilterMode::Ontem, "Ontem"),
    (DateFilterMode::Periodo, "Período"),
];

/// Rango escrito en los inputs (se lee del DOM en el momento del cambio)
fn read_period(prefix: &str, mode: DateFilterMode) -> DateFilter {
    let date = |suffix: &str| {
        field_value(&format!("{}-filter-date-{}", prefix, suffix)).and_then(|v| parse_date_input(&v))
    };
    DateFilter { mode, inicio: date("start"), fim: date("end") }
}

/// `prefix` separa los ids de cada vista (`kanban`, `user-tasks`)
pub fn render_date_filter(
    prefix: &str,
    filter: &DateFilter,
    on_apply: Rc<dyn Fn(DateFilter)>,
) -> Result<Element, JsValue> {
    let buttons = ElementBuilder::new("div")?.class("date-filter-buttons").build();
    for (mode, label) in MODES {
        let btn = ElementBuilder::new("button")?
            .class("btn btn-filter")
            .class_if("active", filter.mode == mode)?
            .id(&format!("{}-filter-{}", prefix, mode.as_str()))?
            .attr("type", "button")?
            .text(label)
            .build();
        let prefix = prefix.to_string();
        let on_apply = on_apply.clone();
        on_click(&btn, move |_| on_apply(read_period(&prefix, mode)))?;
        buttons.append_child(&btn)?;
    }

    let start = ElementBuilder::new("input")?
        .id(&format!("{}-filter-date-start", prefix))?
        .attr("type", "date")?
        .attr("value", &filter.inicio.map(to_date_input).unwrap_or_default())?
        .build();
    {
        let prefix = prefix.to_string();
        let on_apply = on_apply.clone();
        on_change(&start, move |_: Event| on_apply(read_period(&prefix, DateFilterMode::Periodo)))?;
    }

    let end = ElementBuilder::new("input")?
        .id(&format!("{}-filter-date-end", prefix))?
        .attr("type", "date")?
        .attr("value", &filter.fim.map(to_date_input).unwrap_or_default())?
        .build();
    {
        let prefix = prefix.to_string();
        on_change(&end, move |_: Event| on_apply(read_period(&prefix, DateFilterMode::Periodo)))?;
    }

    let period = ElementBuilder::new("div")?
        .class("date-filter-period")
        .class_if("hidden", filter.mode != DateFilterMode::Periodo)?
        .child(ElementBuilder::new("label")?.text("De").build())?
        .child(start)?
        .child(ElementBuilder::new("label")?.text("Até").build())?
        .child(end)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("date-filter")
        .child(buttons)?
        .child(period)?
        .build())
}
