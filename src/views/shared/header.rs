// ============================================================================
// HEADER - Saludo, navegación por cargo, tema y salida
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{button, document, get_element_by_id, on_click, toggle_class, ElementBuilder};
use crate::state::{ActiveView, AppState, ModalState, Theme};
use crate::utils::constants::APP_NAME;
use crate::viewmodels::permissions::{greeting, RoleVisibility};
use crate::viewmodels::{NavigationViewModel, SessionViewModel};

/// `data-theme="light"` en <html>; sin atributo en oscuro
pub fn apply_theme(theme: Theme) -> Result<(), JsValue> {
    let Some(root) = document().and_then(|d| d.document_element()) else {
        return Ok(());
    };
    match theme {
        Theme::Light => root.set_attribute("data-theme", "light"),
        Theme::Dark => root.remove_attribute("data-theme"),
    }
}

fn nav_button(state: &AppState, id: &str, label: &str, view: ActiveView) -> Result<Element, JsValue> {
    let btn = ElementBuilder::new("button")?
        .class("btn btn-nav")
        .class_if("active", state.get_active_view() == view)?
        .id(id)?
        .attr("type", "button")?
        .text(label)
        .build();
    let state = state.clone();
    on_click(&btn, move |_| NavigationViewModel::new(&state).switch_to(view))?;
    Ok(btn)
}

/// Renderizar cabecera
pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    apply_theme(state.get_theme())?;

    let profile = state.auth.get_profile();
    let visibility = RoleVisibility::for_profile(profile.as_ref());

    let brand = ElementBuilder::new("div")?
        .class("brand")
        .child(ElementBuilder::new("h1")?.text(APP_NAME).build())?
        .child(
            ElementBuilder::new("span")?
                .id("user-info")?
                .class("user-info")
                .text(&profile.as_ref().map(greeting).unwrap_or_default())
                .build(),
        )?
        .build();

    let nav = ElementBuilder::new("nav")?.id("nav-links")?.class("nav-links").build();

    let nova = button("btn btn-primary", "+ Nova Demanda")?;
    {
        let state = state.clone();
        on_click(&nova, move |_| state.set_modal(Some(ModalState::NovaDemanda)))?;
    }
    nav.append_child(&nova)?;
    let btn = nav_button(state, "btn-meu-painel", "Meu Painel", ActiveView::Dashboard)?;
    nav.append_child(&btn)?;

    if visibility.approval_deck {
        let btn = nav_button(state, "btn-deck-aprovacao", "Deck de Aprovação", ActiveView::ApprovalDeck)?;
        nav.append_child(&btn)?;
    }
    if visibility.user_tasks {
        let btn = nav_button(state, "btn-user-tasks", "Por Usuário", ActiveView::UserTasks)?;
        nav.append_child(&btn)?;
    }
    if visibility.cronograma {
        let btn = nav_button(state, "btn-cronograma", "Cronograma", ActiveView::Cronograma)?;
        nav.append_child(&btn)?;
    }
    if visibility.reports {
        let btn = nav_button(state, "btn-relatorios", "Relatórios", ActiveView::Bi)?;
        nav.append_child(&btn)?;
    }
    if visibility.employees {
        let btn = nav_button(state, "btn-usuarios", "Funcionários", ActiveView::Funcionarios)?;
        nav.append_child(&btn)?;
    }

    let theme_toggle = ElementBuilder::new("button")?
        .id("theme-toggle")?
        .class("btn btn-icon theme-toggle")
        .attr("type", "button")?
        .attr("title", "Alternar tema")?
        .text(state.get_theme().icon())
        .build();
    {
        let state = state.clone();
        on_click(&theme_toggle, move |_| state.toggle_theme())?;
    }
    nav.append_child(&theme_toggle)?;

    let logout = button("btn btn-secondary", "Sair")?;
    {
        let state = state.clone();
        on_click(&logout, move |_| {
            let state = state.clone();
            spawn_local(async move {
                SessionViewModel::new(&state).sign_out().await;
            });
        })?;
    }
    nav.append_child(&logout)?;

    // Menú lateral en móvil
    let menu = ElementBuilder::new("button")?
        .id("mobile-menu-toggle")?
        .class("mobile-menu-toggle")
        .attr("type", "button")?
        .html("<span></span><span></span><span></span>")
        .build();
    on_click(&menu, move |_| {
        if let Some(links) = get_element_by_id("nav-links") {
            let open = !links.class_list().contains("active");
            let _ = toggle_class(&links, "active", open);
        }
    })?;

    Ok(ElementBuilder::new("div")?
        .class("header-content")
        .child(brand)?
        .child(menu)?
        .child(nav)?
        .build())
}
