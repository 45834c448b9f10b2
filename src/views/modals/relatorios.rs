// ============================================================================
// RELATORIOS - Modales de PDF (cronograma y "Meu Painel")
// ============================================================================

use chrono::Datelike;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, field_value, form_group, on_submit, print_report, ElementBuilder};
use crate::services::ReportDocument;
use crate::state::AppState;
use crate::utils::{parse_date_input, to_date_input, today};
use crate::viewmodels::ReportsViewModel;
use crate::views::modals::{cancel_button, form_actions, input, modal_frame};

fn date_value(id: &str) -> Option<chrono::NaiveDate> {
    field_value(id).and_then(|v| parse_date_input(&v))
}

fn generate_button() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("📄 Gerar PDF")
        .build())
}

/// Imprimir y cerrar; los errores se muestran como alerta
fn print_and_close(state: &AppState, result: Result<ReportDocument, String>) {
    match result {
        Ok(report) => {
            if let Err(e) = print_report(&report) {
                log::error!("❌ [REPORTS] Erro ao abrir janela de impressão: {:?}", e);
                alert("Erro ao gerar PDF: não foi possível abrir a janela de impressão.");
                return;
            }
            state.close_modal();
        }
        Err(e) => alert(&e),
    }
}

pub(super) fn render_pdf_cronograma(state: &AppState) -> Result<Element, JsValue> {
    let hoje = today();
    let inicio = hoje.with_day(1).unwrap_or(hoje);

    let form = ElementBuilder::new("form")?
        .id("form-pdf-cronograma")?
        .child(form_group("Data de início", "pdf-data-inicio", input("pdf-data-inicio", "date", &to_date_input(inicio))?)?)?
        .child(form_group("Data de fim", "pdf-data-fim", input("pdf-data-fim", "date", &to_date_input(hoje))?)?)?
        .child(form_actions(vec![cancel_button(state)?, generate_button()?])?)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let start = date_value("pdf-data-inicio");
            let end = date_value("pdf-data-fim");
            let state = state.clone();
            spawn_local(async move {
                let result = ReportsViewModel::new(&state).entregas(start, end).await;
                print_and_close(&state, result);
            });
        })?;
    }

    modal_frame(state, "modal-pdf-cronograma", "Relatório de Entregas", form)
}

pub(super) fn render_pdf_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("form-pdf-dashboard")?
        .child(form_group("Data", "pdf-dashboard-data", input("pdf-dashboard-data", "date", &to_date_input(today()))?)?)?
        .child(form_actions(vec![cancel_button(state)?, generate_button()?])?)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let day = date_value("pdf-dashboard-data");
            let state = state.clone();
            spawn_local(async move {
                let result = ReportsViewModel::new(&state).demandas_do_dia(day).await;
                print_and_close(&state, result);
            });
        })?;
    }

    modal_frame(state, "modal-pdf-dashboard", "Relatório de Demandas", form)
}
