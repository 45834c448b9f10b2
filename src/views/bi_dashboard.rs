// ============================================================================
// BI DASHBOARD VIEW - "Relatórios": KPIs, donut por estado, barras y tabla
// ============================================================================

use chrono::Utc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlSelectElement};

use crate::dom::{on_change, ElementBuilder};
use crate::state::{AppState, IncrementalUpdate};
use crate::viewmodels::bi::{
    bi_table, chart_label, conic_gradient, filter_by_assignee, status_color, status_distribution, users_chart, BiKpis,
    BiRow, StatusSlice, UserBar,
};
use crate::views::shared::render_user_select;

fn kpi_card(id: &str, label: &str, value: usize, modifier: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(&format!("kpi-card {}", modifier))
        .child(ElementBuilder::new("span")?.id(id)?.class("kpi-value").text(&value.to_string()).build())?
        .child(ElementBuilder::new("span")?.class("kpi-label").text(label).build())?
        .build())
}

fn render_kpis(kpis: &BiKpis) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("kpi-grid")
        .child(kpi_card("kpi-abertas", "Demandas Abertas", kpis.abertas, "kpi-abertas")?)?
        .child(kpi_card("kpi-concluidas", "Concluídas (30 dias)", kpis.concluidas_30d, "kpi-concluidas")?)?
        .child(kpi_card("kpi-andamento", "Em Andamento", kpis.em_andamento, "kpi-andamento")?)?
        .child(kpi_card("kpi-atrasadas", "Atrasadas", kpis.atrasadas, "kpi-atrasadas")?)?
        .build())
}

fn render_status_chart(slices: &[StatusSlice]) -> Result<Element, JsValue> {
    let total: usize = slices.iter().map(|s| s.count).sum();

    let center = ElementBuilder::new("div")?
        .class("donut-center")
        .child(ElementBuilder::new("span")?.class("donut-center-value").text(&total.to_string()).build())?
        .child(ElementBuilder::new("span")?.class("donut-center-label").text("Total").build())?
        .build();
    let donut = ElementBuilder::new("div")?
        .class("donut-chart")
        .attr("style", &format!("background: {}", conic_gradient(slices)))?
        .child(center)?
        .build();

    let legend = ElementBuilder::new("div")?.class("chart-legend").build();
    for slice in slices {
        let item = ElementBuilder::new("div")?
            .class("legend-item")
            .child(
                ElementBuilder::new("span")?
                    .class("legend-color")
                    .attr("style", &format!("background: {}", status_color(slice.status)))?
                    .build(),
            )?
            .child(
                ElementBuilder::new("span")?
                    .class("legend-label")
                    .text(&format!("{}: {}", chart_label(slice.status), slice.count))
                    .build(),
            )?
            .build();
        legend.append_child(&item)?;
    }

    Ok(ElementBuilder::new("div")?
        .id("chart-status")?
        .class("chart-card")
        .child(ElementBuilder::new("h3")?.text("Demandas por Status").build())?
        .child(
            ElementBuilder::new("div")?
                .class("donut-chart-container")
                .child(donut)?
                .child(legend)?
                .build(),
        )?
        .build())
}

fn render_users_chart(bars: &[UserBar]) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id("chart-usuarios")?
        .class("chart-card")
        .child(ElementBuilder::new("h3")?.text("Demandas por Usuário").build())?
        .build();

    if bars.is_empty() {
        container.append_child(&ElementBuilder::new("p")?.class("empty-message").text("Nenhum dado encontrado").build())?;
        return Ok(container);
    }

    let chart = ElementBuilder::new("div")?.class("chart-bars").build();
    for bar in bars {
        let style = format!(
            "height: {:.0}px; background: linear-gradient(180deg, {}, {}88);",
            bar.height_px, bar.color, bar.color
        );
        let item = ElementBuilder::new("div")?
            .class("chart-bar-item")
            .attr("title", &format!("{}: {} ({} concluídas)", bar.nome, bar.total, bar.concluidas))?
            .child(ElementBuilder::new("span")?.class("chart-bar-value").text(&bar.total.to_string()).build())?
            .child(ElementBuilder::new("div")?.class("chart-bar").attr("style", &style)?.build())?
            .child(ElementBuilder::new("span")?.class("chart-bar-label").text(bar.first_name()).build())?
            .build();
        chart.append_child(&item)?;
    }
    container.append_child(&chart)?;
    Ok(container)
}

fn cell(value: usize) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.class("count-cell").text(&value.to_string()).build())
}

fn render_table(rows: &[BiRow]) -> Result<Element, JsValue> {
    let head = ElementBuilder::new("thead")?.build();
    let head_row = ElementBuilder::new("tr")?.build();
    for label in ["Usuário", "A Fazer", "Em Andamento", "Para Aprovação", "Concluídas", "Total"] {
        head_row.append_child(&ElementBuilder::new("th")?.text(label).build())?;
    }
    head.append_child(&head_row)?;

    let body = ElementBuilder::new("tbody")?.id("bi-table-tbody")?.build();
    if rows.is_empty() {
        let empty = ElementBuilder::new("td")?
            .class("empty-cell")
            .attr("colspan", "6")?
            .text("Nenhum dado encontrado")
            .build();
        body.append_child(&ElementBuilder::new("tr")?.child(empty)?.build())?;
    }
    for row in rows {
        let total = ElementBuilder::new("td")?
            .class("count-cell")
            .child(ElementBuilder::new("span")?.class("count-highlight").text(&row.total.to_string()).build())?
            .build();
        let tr = ElementBuilder::new("tr")?
            .child(ElementBuilder::new("td")?.class("user-name").text(&row.nome).build())?
            .child(cell(row.a_fazer)?)?
            .child(cell(row.em_andamento)?)?
            .child(cell(row.para_aprovacao)?)?
            .child(cell(row.concluidas)?)?
            .child(total)?
            .build();
        body.append_child(&tr)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("bi-table-card")
        .child(ElementBuilder::new("h3")?.text("Resumo por Usuário").build())?
        .child(ElementBuilder::new("table")?.class("bi-table").child(head)?.child(body)?.build())?
        .build())
}

/// Renderizar BI
pub fn render_bi_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let filter_user = state.views.bi.get_filter_user();

    // Filtro local: no hace falta volver a pedir datos
    let select = render_user_select("bi-filter-usuario", &state.auth.get_users(), filter_user.as_deref(), "Visão Geral", |u| {
        u.display_name()
    })?;
    {
        let state = state.clone();
        on_change(&select, move |event: Event| {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .filter(|v| !v.is_empty());
            state.views.bi.set_filter_user(value);
            state.notify(IncrementalUpdate::Content);
        })?;
    }

    let view = ElementBuilder::new("section")?
        .id("bi-dashboard-section")?
        .class("bi-dashboard-view")
        .child(
            ElementBuilder::new("div")?
                .class("bi-header")
                .child(ElementBuilder::new("h2")?.class("view-title").text("Relatórios").build())?
                .child(select)?
                .build(),
        )?
        .build();

    let list = &state.views.bi.list;
    if !list.is_loaded() {
        view.append_child(&ElementBuilder::new("p")?.class("loading").text("Carregando relatórios...").build())?;
        return Ok(view);
    }

    let all = list.get();
    let filtered = filter_by_assignee(&all, filter_user.as_deref());

    let kpis = render_kpis(&BiKpis::compute(&filtered, Utc::now()))?;
    view.append_child(&kpis)?;
    view.append_child(
        &ElementBuilder::new("div")?
            .class("charts-grid")
            .child(render_status_chart(&status_distribution(&filtered))?)?
            .child(render_users_chart(&users_chart(&all))?)?
            .build(),
    )?;
    let table = render_table(&bi_table(&all, filter_user.as_deref()))?;
    view.append_child(&table)?;
    Ok(view)
}
