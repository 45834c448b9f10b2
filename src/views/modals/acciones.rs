// ============================================================================
// ACCIONES - Editar, delegar y confirmar inicio
// ============================================================================

use chrono::Local;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{button, field_text, field_value, form_group, on_click, on_submit, ElementBuilder};
use crate::models::{Demanda, DemandaEdit};
use crate::state::AppState;
use crate::utils::{parse_datetime_local, to_datetime_local};
use crate::viewmodels::lifecycle::start_confirmation_text;
use crate::views::modals::{cancel_button, form_actions, input, modal_frame};
use crate::views::shared::{render_user_select, spawn_write};

const MSG_UPDATED: &str = "Demanda atualizada com sucesso!";
const MSG_DELEGATED: &str = "Demanda delegada com sucesso!";

fn submit_button(label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(label)
        .build())
}

fn read_edit() -> DemandaEdit {
    DemandaEdit {
        titulo: field_text("editar-titulo").unwrap_or_default(),
        descricao: field_text("editar-descricao"),
        data_previsao: field_value("editar-previsao").and_then(|v| parse_datetime_local(&v, &Local)),
        horas_estimadas: field_text("editar-horas")
            .and_then(|v| v.replace(',', ".").parse::<f64>().ok())
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(CONFIG.demanda_config.default_estimated_hours),
    }
}

pub(super) fn render_editar(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let descricao = ElementBuilder::new("textarea")?
        .id("editar-descricao")?
        .class("form-control")
        .attr("rows", "4")?
        .text(demanda.descricao.as_deref().unwrap_or_default())
        .build();
    let previsao = demanda
        .data_previsao
        .map(|p| to_datetime_local(&p, &Local))
        .unwrap_or_default();

    let form = ElementBuilder::new("form")?
        .id("form-editar-demanda")?
        .child(form_group("Título *", "editar-titulo", input("editar-titulo", "text", &demanda.titulo)?)?)?
        .child(form_group("Descrição", "editar-descricao", descricao)?)?
        .child(form_group("Data de previsão", "editar-previsao", input("editar-previsao", "datetime-local", &previsao)?)?)?
        .child(form_group(
            "Horas estimadas",
            "editar-horas",
            input("editar-horas", "number", &demanda.horas().to_string())?,
        )?)?
        .child(form_actions(vec![cancel_button(state)?, submit_button("Salvar")?])?)?
        .build();

    {
        let state = state.clone();
        let id = demanda.id.clone();
        on_submit(&form, move || {
            let fields = read_edit();
            let id = id.clone();
            spawn_write(&state, Some(MSG_UPDATED), move |vm| async move { vm.edit(&id, fields).await });
        })?;
    }

    modal_frame(state, "modal-editar-demanda", "Editar Demanda", form)
}

pub(super) fn render_delegar(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let me = state.auth.acting_id();
    let candidates: Vec<_> = state
        .auth
        .get_users()
        .into_iter()
        .filter(|u| Some(&u.id) != me.as_ref())
        .collect();
    let select = render_user_select("delegar-usuario", &candidates, None, "Selecione um usuário...", |u| {
        format!("{} ({})", u.display_name(), u.cargo_label())
    })?;

    let form = ElementBuilder::new("form")?
        .id("form-delegar")?
        .child(ElementBuilder::new("p")?.class("modal-subtitle").text(&demanda.titulo).build())?
        .child(form_group("Delegar para", "delegar-usuario", select)?)?
        .child(form_actions(vec![cancel_button(state)?, submit_button("Delegar")?])?)?
        .build();

    {
        let state = state.clone();
        let id = demanda.id.clone();
        on_submit(&form, move || {
            let selected = field_text("delegar-usuario");
            let id = id.clone();
            spawn_write(&state, Some(MSG_DELEGATED), move |vm| async move {
                vm.delegate(&id, selected.as_deref()).await
            });
        })?;
    }

    modal_frame(state, "modal-delegar", "Delegar Demanda", form)
}

pub(super) fn render_confirmar_inicio(state: &AppState, id: &str, titulo: &str) -> Result<Element, JsValue> {
    let confirmar = button("btn btn-primary", "Iniciar")?;
    {
        let state = state.clone();
        let id = id.to_string();
        on_click(&confirmar, move |_| {
            let id = id.clone();
            spawn_write(&state, None, move |vm| async move { vm.start(&id).await });
        })?;
    }

    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .child(ElementBuilder::new("p")?.text(&start_confirmation_text(titulo)).build())?
        .child(form_actions(vec![cancel_button(state)?, confirmar])?)?
        .build();

    modal_frame(state, "modal-confirmar-inicio", "Iniciar Demanda", body)
}
