// ============================================================================
// FUNCIONARIOS VIEW - Tabla de perfiles con cambio de cargo y baja
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, button, confirm, on_click, ElementBuilder};
use crate::models::Profile;
use crate::state::{AppState, ModalState};
use crate::viewmodels::funcionarios_viewmodel::{delete_confirmation_text, MSG_NO_CREATE_PERMISSION, MSG_NO_DELETE_PERMISSION};
use crate::viewmodels::permissions::can_create_users;
use crate::viewmodels::FuncionariosViewModel;

fn render_actions(state: &AppState, profile: &Profile, is_me: bool) -> Result<Element, JsValue> {
    let td = ElementBuilder::new("td")?.class("actions-cell").build();

    let editar = button("btn btn-primary btn-sm btn-edit-cargo", "Editar Cargo")?;
    {
        let state = state.clone();
        let profile = profile.clone();
        on_click(&editar, move |_| state.set_modal(Some(ModalState::EditarCargo(profile.clone()))))?;
    }
    td.append_child(&editar)?;

    // Nadie se da de baja a sí mismo
    if !is_me {
        let excluir = button("btn btn-excluir btn-sm btn-delete-user", "Excluir")?;
        let state = state.clone();
        let id = profile.id.clone();
        let nome = profile.display_name();
        on_click(&excluir, move |_| {
            if !can_create_users(state.auth.cargo()) {
                alert(MSG_NO_DELETE_PERMISSION);
                return;
            }
            if !confirm(&delete_confirmation_text(&nome)) {
                return;
            }
            let state = state.clone();
            let id = id.clone();
            let nome = nome.clone();
            spawn_local(async move {
                match FuncionariosViewModel::new(&state).delete(&id).await {
                    Ok(()) => alert(&format!("Usuário \"{}\" excluído com sucesso!", nome)),
                    Err(e) => alert(&e),
                }
            });
        })?;
        td.append_child(&excluir)?;
    }
    Ok(td)
}

fn render_row(state: &AppState, profile: &Profile, me: Option<&str>) -> Result<Element, JsValue> {
    let cargo_class = profile
        .cargo
        .map(|c| format!("cargo-badge cargo-{}", c.as_str()))
        .unwrap_or_else(|| "cargo-badge".to_string());
    let badge = ElementBuilder::new("span")?.class(&cargo_class).text(profile.cargo_label()).build();

    Ok(ElementBuilder::new("tr")?
        .child(ElementBuilder::new("td")?.text(&profile.display_name()).build())?
        .child(ElementBuilder::new("td")?.text(profile.email.as_deref().unwrap_or("-")).build())?
        .child(ElementBuilder::new("td")?.child(badge)?.build())?
        .child(render_actions(state, profile, me == Some(profile.id.as_str()))?)?
        .build())
}

/// Renderizar gestión de funcionários
pub fn render_funcionarios(state: &AppState) -> Result<Element, JsValue> {
    let novo = button("btn btn-primary", "+ Novo Funcionário")?;
    {
        let state = state.clone();
        on_click(&novo, move |_| {
            if can_create_users(state.auth.cargo()) {
                state.set_modal(Some(ModalState::NovoFuncionario));
            } else {
                alert(MSG_NO_CREATE_PERMISSION);
            }
        })?;
    }

    let head_row = ElementBuilder::new("tr")?.build();
    for label in ["Nome", "Email", "Cargo", "Ações"] {
        head_row.append_child(&ElementBuilder::new("th")?.text(label).build())?;
    }

    let me = state.auth.acting_id();
    let body = ElementBuilder::new("tbody")?.id("funcionarios-tbody")?.build();
    for profile in state.auth.get_users() {
        let row = render_row(state, &profile, me.as_deref())?;
        body.append_child(&row)?;
    }

    let table = ElementBuilder::new("table")?
        .class("funcionarios-table")
        .child(ElementBuilder::new("thead")?.child(head_row)?.build())?
        .child(body)?
        .build();

    Ok(ElementBuilder::new("section")?
        .id("funcionarios-section")?
        .class("funcionarios-view")
        .child(
            ElementBuilder::new("div")?
                .class("section-header")
                .child(ElementBuilder::new("h2")?.class("view-title").text("Funcionários").build())?
                .child(novo)?
                .build(),
        )?
        .child(ElementBuilder::new("div")?.class("table-wrapper").child(table)?.build())?
        .build())
}
