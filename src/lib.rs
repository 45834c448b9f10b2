// ============================================================================
// MSA DEMANDAS - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Proyecciones puras + flujos sobre AppState
// - Services: SOLO comunicación con Supabase (REST, auth, storage, realtime)
// - State: State Management con Rc<RefCell>
// - Models: Filas de `demandas` y `profiles`
// ============================================================================

mod models;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod error;
mod config;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;
use crate::state::UpdateType;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 MSA Demandas - Rust Puro + MVVM ({})", CONFIG.environment);
    if CONFIG.supabase_anon_key.is_empty() {
        log::warn!("⚠️ [CONFIG] SUPABASE_ANON_KEY vacía: las llamadas a Supabase van a fallar");
    }

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Función pública para re-renderizar la app (re-render completo)
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Función pública para actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| match update_type {
        UpdateType::Incremental(region) => {
            log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", region);
            // Primero intentamos actualización incremental
            let needs_full_render = match app_cell.borrow().as_ref() {
                Some(app) => match app.update_incremental(region) {
                    Ok(()) => false,
                    Err(e) => {
                        log::warn!("⚠️ [UPDATE] {:?}, cambiando a re-render completo", e);
                        true
                    }
                },
                None => {
                    log::warn!("⚠️ [UPDATE] App no está inicializada");
                    false
                }
            };

            // Liberado el borrow anterior, hacemos el re-render
            if needs_full_render {
                if let Some(app) = app_cell.borrow_mut().as_mut() {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                }
            }
        }
        UpdateType::FullRender => {
            log::debug!("🔄 [RERENDER] Re-render completo");
            match app_cell.borrow_mut().as_mut() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
            }
        }
    });
}

/// Función pública WASM para re-renderizar la app (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
