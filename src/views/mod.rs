// ============================================================================
// VIEWS - Funciones que construyen DOM a partir de AppState
// ============================================================================

pub mod shared;
pub mod modals;
pub mod login;
pub mod demanda_card;
pub mod kanban;
pub mod user_tasks;
pub mod cronograma;
pub mod user_dashboard;
pub mod bi_dashboard;
pub mod funcionarios;
pub mod approval_deck;

pub use login::{render_login, render_restoring};
pub use modals::render_modal;
pub use shared::render_header;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::{ActiveView, AppState};

/// Renderizar la vista activa dentro de #app-content
pub fn render_content(state: &AppState) -> Result<Element, JsValue> {
    match state.get_active_view() {
        ActiveView::Kanban => kanban::render_kanban(state),
        ActiveView::UserTasks => user_tasks::render_user_tasks(state),
        ActiveView::Cronograma => cronograma::render_cronograma(state),
        ActiveView::Dashboard => user_dashboard::render_user_dashboard(state),
        ActiveView::Bi => bi_dashboard::render_bi_dashboard(state),
        ActiveView::Funcionarios => funcionarios::render_funcionarios(state),
        ActiveView::ApprovalDeck => approval_deck::render_approval_deck(state),
    }
}
