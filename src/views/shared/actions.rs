// ============================================================================
// ACTIONS - Escrituras sobre demandas lanzadas desde la UI
// ============================================================================

use std::future::Future;

use wasm_bindgen_futures::spawn_local;

use crate::dom::alert;
use crate::state::AppState;
use crate::viewmodels::DemandaViewModel;

/// Ejecutar una escritura; si va bien: alerta opcional, cerrar modal y recargar
pub fn spawn_write<F, Fut>(state: &AppState, success: Option<&'static str>, op: F)
where
    F: FnOnce(DemandaViewModel) -> Fut + 'static,
    Fut: Future<Output = Result<(), String>> + 'static,
{
    let state = state.clone();
    spawn_local(async move {
        match op(DemandaViewModel::new(&state)).await {
            Ok(()) => {
                if let Some(message) = success {
                    alert(message);
                }
                DemandaViewModel::new(&state).after_write().await;
            }
            Err(e) => alert(&e),
        }
    });
}
