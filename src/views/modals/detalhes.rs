// ============================================================================
// DETALHES - Modal de detalles con pestañas (Detalhes / Anexos) y acciones
// ============================================================================

use chrono::Local;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, button, confirm, field_value, on_click, open_in_new_tab, option, ElementBuilder};
use crate::models::{Demanda, DemandaStatus};
use crate::state::{AppState, DetailTab, ModalState};
use crate::utils::format_local;
use crate::viewmodels::DemandaViewModel;
use crate::views::modals::modal_frame;
use crate::views::shared::spawn_write;

const MSG_DELETE_CONFIRM: &str = "Tem certeza que deseja excluir esta demanda? Esta ação não pode ser desfeita.";
const MSG_DELETED: &str = "Demanda excluída com sucesso!";
const MSG_DUPLICATED: &str = "Demanda duplicada com sucesso!";

fn detail_row(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-row")
        .child(ElementBuilder::new("strong")?.text(label).build())?
        .child(ElementBuilder::new("span")?.text(value).build())?
        .build())
}

fn render_tabs(state: &AppState, demanda: &Demanda, active: DetailTab) -> Result<Element, JsValue> {
    let tabs = ElementBuilder::new("div")?.class("modal-tabs").build();
    for (tab, key, label) in [(DetailTab::Detalhes, "detalhes", "Detalhes"), (DetailTab::Anexos, "anexos", "Anexos")] {
        let btn = ElementBuilder::new("button")?
            .class("modal-tab")
            .class_if("active", tab == active)?
            .attr("type", "button")?
            .data("tab", key)?
            .text(label)
            .build();
        let state = state.clone();
        let demanda = demanda.clone();
        on_click(&btn, move |_| {
            state.set_modal(Some(ModalState::Detalhes { demanda: demanda.clone(), tab }));
        })?;
        tabs.append_child(&btn)?;
    }
    Ok(tabs)
}

fn render_status_control(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id("mudar-status")?.class("form-control").build();
    for status in DemandaStatus::ALL {
        let opt = option(status.as_str(), status.label(), status == demanda.status)?;
        select.append_child(&opt)?;
    }

    let save = button("btn btn-primary", "Salvar")?;
    {
        let state = state.clone();
        let id = demanda.id.clone();
        let current = demanda.status;
        on_click(&save, move |_| {
            let Some(status) = field_value("mudar-status").and_then(|v| DemandaStatus::from_tag(&v)) else {
                return;
            };
            if status == current {
                state.close_modal();
                return;
            }
            let id = id.clone();
            spawn_write(&state, None, move |vm| async move {
                vm.update_status(&id, status).await
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("status-control")
        .child(ElementBuilder::new("label")?.attr("for", "mudar-status")?.text("Mudar status:").build())?
        .child(select)?
        .child(save)?
        .build())
}

fn render_actions(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let excluir = button("btn btn-danger", "Excluir")?;
    {
        let state = state.clone();
        let id = demanda.id.clone();
        on_click(&excluir, move |_| {
            if !confirm(MSG_DELETE_CONFIRM) {
                return;
            }
            let id = id.clone();
            spawn_write(&state, Some(MSG_DELETED), move |vm| async move { vm.delete(&id).await });
        })?;
    }

    let duplicar = button("btn btn-secondary", "Duplicar")?;
    {
        let state = state.clone();
        let demanda = demanda.clone();
        on_click(&duplicar, move |_| {
            let state = state.clone();
            let demanda = demanda.clone();
            spawn_local(async move {
                let vm = DemandaViewModel::new(&state);
                match vm.duplicate(&demanda).await {
                    Ok(_) => {
                        alert(MSG_DUPLICATED);
                        vm.after_write().await;
                    }
                    Err(e) => alert(&e),
                }
            });
        })?;
    }

    let delegar = button("btn btn-secondary", "Delegar")?;
    {
        let state = state.clone();
        let demanda = demanda.clone();
        on_click(&delegar, move |_| state.set_modal(Some(ModalState::Delegar(demanda.clone()))))?;
    }

    let editar = button("btn btn-primary", "Editar")?;
    {
        let state = state.clone();
        let demanda = demanda.clone();
        on_click(&editar, move |_| state.set_modal(Some(ModalState::Editar(demanda.clone()))))?;
    }

    Ok(ElementBuilder::new("div")?
        .class("modal-actions")
        .child(excluir)?
        .child(duplicar)?
        .child(delegar)?
        .child(editar)?
        .build())
}

fn render_detalhes_tab(state: &AppState, demanda: &Demanda) -> Result<Element, JsValue> {
    let previsao = demanda
        .data_previsao
        .map(|p| format_local(&p))
        .unwrap_or_else(|| "-".to_string());
    Ok(ElementBuilder::new("div")?
        .id("tab-detalhes")?
        .class("modal-tab-content active")
        .child(detail_row("Código:", &demanda.task_code(&Local))?)?
        .child(detail_row("Descrição:", demanda.descricao.as_deref().unwrap_or("Sem descrição"))?)?
        .child(detail_row("Criado por:", &demanda.criador_nome())?)?
        .child(detail_row("Atribuído para:", &demanda.atribuido_nome())?)?
        .child(detail_row("Status:", demanda.status.label())?)?
        .child(detail_row("Previsão:", &previsao)?)?
        .child(detail_row("Horas estimadas:", &demanda.horas_label())?)?
        .child(detail_row("Criado em:", &format_local(&demanda.created_at))?)?
        .child(render_status_control(state, demanda)?)?
        .child(render_actions(state, demanda)?)?
        .build())
}

fn render_anexos_tab(demanda: &Demanda) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id("tab-anexos")?
        .class("modal-tab-content active")
        .build();

    let Some(url) = demanda.arquivo_url.clone() else {
        container.append_child(
            &ElementBuilder::new("p")?.class("empty-message").text("Nenhum anexo nesta demanda.").build(),
        )?;
        return Ok(container);
    };

    let item = ElementBuilder::new("div")?.class("anexo-item").build();
    let link = |label: &str| -> Result<Element, JsValue> {
        Ok(ElementBuilder::new("a")?
            .class("anexo-link")
            .attr("href", &url)?
            .attr("target", "_blank")?
            .attr("rel", "noopener")?
            .text(label)
            .build())
    };

    if demanda.arquivo_is_image() {
        let img = ElementBuilder::new("img")?
            .class("anexo-imagem")
            .attr("src", &url)?
            .attr("alt", "Anexo")?
            .build();
        {
            let url = url.clone();
            on_click(&img, move |_| open_in_new_tab(&url))?;
        }
        item.append_child(&img)?;
        let anchor = link("📥 Abrir em nova aba")?;
        item.append_child(&anchor)?;
    } else {
        let nome = demanda.arquivo_nome().unwrap_or_default();
        item.append_child(&ElementBuilder::new("p")?.class("anexo-label").text("📎 Arquivo anexado:").build())?;
        let anchor = link(&format!("📥 Baixar {}", nome))?;
        item.append_child(&anchor)?;
    }
    container.append_child(&item)?;
    Ok(container)
}

pub(super) fn render(state: &AppState, demanda: &Demanda, tab: DetailTab) -> Result<Element, JsValue> {
    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .child(render_tabs(state, demanda, tab)?)?
        .build();
    let content = match tab {
        DetailTab::Detalhes => render_detalhes_tab(state, demanda)?,
        DetailTab::Anexos => render_anexos_tab(demanda)?,
    };
    body.append_child(&content)?;
    modal_frame(state, "modal-ver-demanda", &demanda.titulo, body)
}
