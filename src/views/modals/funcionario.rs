// ============================================================================
// FUNCIONARIO - Alta de empleado y cambio de cargo
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, field_text, field_value, form_group, on_submit, option, ElementBuilder};
use crate::models::{Cargo, Profile};
use crate::state::AppState;
use crate::viewmodels::{FuncionariosViewModel, NovoFuncionarioForm};
use crate::views::modals::{cancel_button, form_actions, input, modal_frame};

const MSG_CARGO_UPDATED: &str = "Cargo atualizado com sucesso!";

fn cargo_select(id: &str, selected: Option<Cargo>) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id(id)?.class("form-control").build();
    let opt = option("", "Selecione o cargo...", selected.is_none())?;
    select.append_child(&opt)?;
    for cargo in Cargo::ALL {
        let opt = option(cargo.as_str(), cargo.label(), Some(cargo) == selected)?;
        select.append_child(&opt)?;
    }
    Ok(select)
}

fn submit_button(label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(label)
        .build())
}

fn read_novo() -> NovoFuncionarioForm {
    NovoFuncionarioForm {
        nome: field_text("novo-func-nome").unwrap_or_default(),
        email: field_text("novo-func-email").unwrap_or_default(),
        whatsapp: field_text("novo-func-whatsapp"),
        senha: field_value("novo-func-senha").unwrap_or_default(),
        cargo: field_value("novo-func-cargo").and_then(|v| Cargo::from_tag(&v)),
        departamento: field_text("novo-func-departamento"),
    }
}

pub(super) fn render_novo(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("form-novo-funcionario")?
        .child(form_group("Nome *", "novo-func-nome", input("novo-func-nome", "text", "")?)?)?
        .child(form_group("Email *", "novo-func-email", input("novo-func-email", "email", "")?)?)?
        .child(form_group("WhatsApp", "novo-func-whatsapp", input("novo-func-whatsapp", "tel", "")?)?)?
        .child(form_group("Senha *", "novo-func-senha", input("novo-func-senha", "password", "")?)?)?
        .child(form_group("Cargo *", "novo-func-cargo", cargo_select("novo-func-cargo", None)?)?)?
        .child(form_group("Departamento", "novo-func-departamento", input("novo-func-departamento", "text", "")?)?)?
        .child(form_actions(vec![cancel_button(state)?, submit_button("Criar Funcionário")?])?)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let form = read_novo();
            if let Err(message) = form.validate() {
                alert(message);
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match FuncionariosViewModel::new(&state).create(form).await {
                    Ok(message) => {
                        state.close_modal();
                        alert(&message);
                    }
                    Err(e) => alert(&e),
                }
            });
        })?;
    }

    modal_frame(state, "modal-novo-funcionario", "Novo Funcionário", form)
}

pub(super) fn render_editar_cargo(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    let nome = ElementBuilder::new("input")?
        .id("edit-nome")?
        .class("form-control")
        .attr("type", "text")?
        .attr("value", &profile.display_name())?
        .flag("readonly", true)?
        .build();

    let form = ElementBuilder::new("form")?
        .id("form-editar-cargo")?
        .child(form_group("Nome", "edit-nome", nome)?)?
        .child(form_group("Cargo", "edit-cargo", cargo_select("edit-cargo", profile.cargo)?)?)?
        .child(form_actions(vec![cancel_button(state)?, submit_button("Salvar")?])?)?
        .build();

    {
        let state = state.clone();
        let id = profile.id.clone();
        on_submit(&form, move || {
            let Some(cargo) = field_value("edit-cargo").and_then(|v| Cargo::from_tag(&v)) else {
                return;
            };
            let state = state.clone();
            let id = id.clone();
            spawn_local(async move {
                match FuncionariosViewModel::new(&state).update_cargo(&id, cargo).await {
                    Ok(()) => {
                        state.close_modal();
                        alert(MSG_CARGO_UPDATED);
                    }
                    Err(e) => alert(&e),
                }
            });
        })?;
    }

    modal_frame(state, "modal-editar-cargo", "Editar Cargo", form)
}
