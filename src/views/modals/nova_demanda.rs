// ============================================================================
// NOVA DEMANDA - Formulario de alta (con adjunto opcional)
// ============================================================================

use chrono::{Duration, Local, Utc};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{alert, field_text, field_value, form_group, on_submit, option, selected_file, ElementBuilder};
use crate::models::DemandaStatus;
use crate::state::AppState;
use crate::utils::{parse_datetime_local, to_datetime_local};
use crate::viewmodels::{DemandaViewModel, NovaDemandaForm};
use crate::views::modals::{cancel_button, form_actions, input, modal_frame};
use crate::views::shared::{assignee_label, render_user_select};

const MSG_CREATED: &str = "Demanda criada com sucesso!";

fn read_form() -> NovaDemandaForm {
    let status = field_value("status-inicial")
        .and_then(|v| DemandaStatus::from_tag(&v))
        .unwrap_or_default();
    NovaDemandaForm {
        titulo: field_text("titulo").unwrap_or_default(),
        descricao: field_text("descricao"),
        atribuido_para: field_text("atribuir-para"),
        status,
        data_previsao: field_value("data-previsao").and_then(|v| parse_datetime_local(&v, &Local)),
        horas_estimadas: field_text("horas-estimadas").and_then(|v| v.replace(',', ".").parse().ok()),
    }
}

pub(super) fn render(state: &AppState) -> Result<Element, JsValue> {
    let me = state.auth.acting_id();
    let users = state.auth.get_users();
    let assignee = render_user_select("atribuir-para", &users, None, "Selecione um usuário...", |u| {
        assignee_label(u, me.as_deref())
    })?;

    let status = ElementBuilder::new("select")?.id("status-inicial")?.class("form-control").build();
    let opt = option(DemandaStatus::AFazer.as_str(), "A Fazer", true)?;
    status.append_child(&opt)?;
    let opt = option(DemandaStatus::Fixo.as_str(), "Fixo", false)?;
    status.append_child(&opt)?;

    let deadline = Utc::now() + Duration::days(CONFIG.demanda_config.default_deadline_days);
    let horas = CONFIG.demanda_config.default_estimated_hours.to_string();

    let descricao = ElementBuilder::new("textarea")?
        .id("descricao")?
        .class("form-control")
        .attr("rows", "4")?
        .build();

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Criar Demanda")
        .build();

    let form = ElementBuilder::new("form")?
        .id("form-nova-demanda")?
        .child(form_group("Título *", "titulo", input("titulo", "text", "")?)?)?
        .child(form_group("Descrição", "descricao", descricao)?)?
        .child(form_group("Atribuir para *", "atribuir-para", assignee)?)?
        .child(form_group("Status inicial", "status-inicial", status)?)?
        .child(form_group(
            "Data de previsão",
            "data-previsao",
            input("data-previsao", "datetime-local", &to_datetime_local(&deadline, &Local))?,
        )?)?
        .child(form_group("Horas estimadas", "horas-estimadas", input("horas-estimadas", "number", &horas)?)?)?
        .child(form_group("Anexo", "arquivo", input("arquivo", "file", "")?)?)?
        .child(form_actions(vec![cancel_button(state)?, submit])?)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let form = read_form();
            if let Err(message) = form.validate() {
                alert(message);
                return;
            }
            let arquivo = selected_file("arquivo");
            let state = state.clone();
            spawn_local(async move {
                let vm = DemandaViewModel::new(&state);
                match vm.create(form, arquivo).await {
                    Ok(_) => {
                        alert(MSG_CREATED);
                        vm.after_write().await;
                    }
                    Err(e) => alert(&e),
                }
            });
        })?;
    }

    modal_frame(state, "modal-nova-demanda", "Nova Demanda", form)
}
