// ============================================================================
// LOGIN VIEW - Login y registro (sin sesión)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

use crate::dom::{field_text, field_value, form_group, get_element_by_id, on_click, on_submit, toggle_class, ElementBuilder};
use crate::state::{AppState, AuthScreen};
use crate::utils::constants::{APP_NAME, MIN_PASSWORD_LEN};
use crate::viewmodels::SessionViewModel;
use crate::views::modals::input;

const ERROR_ID: &str = "auth-error";
const SUBMIT_ID: &str = "auth-submit";

/// Pintar el error en su sitio (sin re-render: los campos conservan lo escrito)
fn show_error(state: &AppState, message: Option<String>) {
    state.auth.set_error(message.clone());
    if let Some(el) = get_element_by_id(ERROR_ID) {
        el.set_text_content(message.as_deref());
        let _ = toggle_class(&el, "hidden", message.is_none());
    }
}

fn set_busy(state: &AppState, busy: bool, idle_label: &str) {
    state.auth.set_busy(busy);
    if let Some(btn) = get_element_by_id(SUBMIT_ID) {
        let _ = if busy {
            btn.set_attribute("disabled", "")
        } else {
            btn.remove_attribute("disabled")
        };
        btn.set_text_content(Some(if busy { "Aguarde..." } else { idle_label }));
    }
}

fn error_box(state: &AppState) -> Result<Element, JsValue> {
    let error = state.auth.get_error();
    Ok(ElementBuilder::new("div")?
        .id(ERROR_ID)?
        .class("error-message")
        .class_if("hidden", error.is_none())?
        .text(error.as_deref().unwrap_or_default())
        .build())
}

fn switch_link(state: &AppState, prompt: &str, label: &str, target: AuthScreen) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?.attr("href", "#")?.text(label).build();
    {
        let state = state.clone();
        on_click(&link, move |event: MouseEvent| {
            event.prevent_default();
            state.auth.set_screen(target);
            state.notify_subscribers();
        })?;
    }
    Ok(ElementBuilder::new("p")?
        .class("auth-switch")
        .text(prompt)
        .child(link)?
        .build())
}

fn submit_button(state: &AppState, label: &str) -> Result<Element, JsValue> {
    let busy = state.auth.is_busy();
    Ok(ElementBuilder::new("button")?
        .id(SUBMIT_ID)?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "Aguarde..." } else { label })
        .build())
}

fn render_login_form(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("login-form")?
        .child(form_group("Email", "login-email", input("login-email", "email", "")?)?)?
        .child(form_group("Senha", "login-password", input("login-password", "password", "")?)?)?
        .child(error_box(state)?)?
        .child(submit_button(state, "Entrar")?)?
        .child(switch_link(state, "Não tem conta? ", "Cadastre-se", AuthScreen::Register)?)?
        .build();

    let state = state.clone();
    on_submit(&form, move || {
        if state.auth.is_busy() {
            return;
        }
        let email = field_text("login-email").unwrap_or_default();
        let password = field_value("login-password").unwrap_or_default();
        show_error(&state, None);
        set_busy(&state, true, "Entrar");

        let state = state.clone();
        spawn_local(async move {
            if let Err(e) = SessionViewModel::new(&state).sign_in(&email, &password).await {
                let message = if e.trim().is_empty() { "Erro ao fazer login".to_string() } else { e };
                set_busy(&state, false, "Entrar");
                show_error(&state, Some(message));
            } else {
                state.auth.set_busy(false);
            }
        });
    })?;
    Ok(form)
}

fn render_register_form(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("register-form")?
        .child(form_group("Nome", "register-nome", input("register-nome", "text", "")?)?)?
        .child(form_group("Email", "register-email", input("register-email", "email", "")?)?)?
        .child(form_group("Senha", "register-password", input("register-password", "password", "")?)?)?
        .child(error_box(state)?)?
        .child(submit_button(state, "Cadastrar")?)?
        .child(switch_link(state, "Já tem conta? ", "Entrar", AuthScreen::Login)?)?
        .build();

    let state = state.clone();
    on_submit(&form, move || {
        if state.auth.is_busy() {
            return;
        }
        let nome = field_text("register-nome").unwrap_or_default();
        let email = field_text("register-email").unwrap_or_default();
        let password = field_value("register-password").unwrap_or_default();
        if nome.is_empty() || email.is_empty() {
            show_error(&state, Some("Por favor, preencha todos os campos.".to_string()));
            return;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            show_error(&state, Some(format!("A senha deve ter pelo menos {} caracteres.", MIN_PASSWORD_LEN)));
            return;
        }
        show_error(&state, None);
        set_busy(&state, true, "Cadastrar");

        let state = state.clone();
        spawn_local(async move {
            if let Err(e) = SessionViewModel::new(&state).sign_up(&nome, &email, &password).await {
                let message = if e.trim().is_empty() { "Erro ao cadastrar".to_string() } else { e };
                set_busy(&state, false, "Cadastrar");
                show_error(&state, Some(message));
            } else {
                state.auth.set_busy(false);
            }
        });
    })?;
    Ok(form)
}

/// Renderizar página de acceso (login o registro)
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let (subtitle, form) = match state.auth.get_screen() {
        AuthScreen::Login => ("Acesse sua conta", render_login_form(state)?),
        AuthScreen::Register => ("Crie sua conta", render_register_form(state)?),
    };

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.class("auth-title").text(APP_NAME).build())?
        .child(ElementBuilder::new("p")?.class("auth-subtitle").text(subtitle).build())?
        .child(form)?
        .build();

    Ok(ElementBuilder::new("div")?
        .id("login-page")?
        .class("auth-page")
        .child(card)?
        .build())
}

/// Pantalla mientras se restaura la sesión guardada
pub fn render_restoring() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("auth-page")
        .child(ElementBuilder::new("p")?.class("loading").text("Carregando...").build())?
        .build())
}
