// ============================================================================
// APP - Aplicación principal: shell, suscripciones y render por regiones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{build_shell, get_element_by_id, region_id, replace_region};
use crate::state::{ActiveView, AppEvent, AppState, IncrementalUpdate};
use crate::viewmodels::{NavigationViewModel, SessionViewModel};
use crate::views::{render_content, render_header, render_login, render_modal, render_restoring};

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move |update_type| {
            // Usar gloo_timers para sacar el render del handler que notificó
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update_type);
            })
            .forget();
        });

        Self::wire_events(&state);

        // Recuperar la sesión guardada (mientras tanto: "Carregando...")
        {
            let state = state.clone();
            spawn_local(async move {
                SessionViewModel::new(&state).restore().await;
            });
        }

        Ok(Self {
            state,
            root: Some(root),
        })
    }

    /// Reacciones a eventos de la aplicación
    fn wire_events(state: &AppState) {
        let bus_state = state.clone();
        state.events.subscribe(move |event| {
            let nav = NavigationViewModel::new(&bus_state);
            match event {
                AppEvent::ProfileLoaded => nav.mount(bus_state.get_active_view()),
                AppEvent::DemandasChanged => nav.refresh_active(),
                AppEvent::UsersChanged => {
                    bus_state.notify(IncrementalUpdate::Header);
                    if bus_state.get_active_view() == ActiveView::Funcionarios {
                        bus_state.notify(IncrementalUpdate::Content);
                    }
                }
                AppEvent::SessionEnded => log::info!("👋 [APP] Sesión cerrada"),
                AppEvent::ViewChanged(_) => {}
            }
        });
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] App::render()");

        let Some(root) = &self.root else {
            return Ok(());
        };
        root.set_inner_html("");

        if !self.state.auth.is_logged_in() {
            let page = if self.state.auth.is_restoring() {
                render_restoring()?
            } else {
                render_login(&self.state)?
            };
            root.append_child(&page)?;
            return Ok(());
        }

        let shell = build_shell()?;
        root.append_child(&shell)?;
        for region in [IncrementalUpdate::Header, IncrementalUpdate::Content, IncrementalUpdate::Modal] {
            self.paint(region)?;
        }
        Ok(())
    }

    /// Actualización incremental: Err si la región no existe y hace falta render completo
    pub fn update_incremental(&self, region: IncrementalUpdate) -> Result<(), JsValue> {
        // Sin sesión solo hay login: se repinta con render completo
        if !self.state.auth.is_logged_in() {
            return Ok(());
        }
        if get_element_by_id(region_id(region)).is_none() {
            return Err(JsValue::from_str("Region not found, needs full render"));
        }
        self.paint(region)
    }

    fn paint(&self, region: IncrementalUpdate) -> Result<(), JsValue> {
        let content = match region {
            IncrementalUpdate::Header => Some(render_header(&self.state)?),
            IncrementalUpdate::Content => Some(render_content(&self.state)?),
            IncrementalUpdate::Modal => render_modal(&self.state)?,
        };
        replace_region(region, content)
    }
}
