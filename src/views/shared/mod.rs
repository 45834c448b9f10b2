// ============================================================================
// SHARED VIEWS - Piezas comunes a varias vistas
// ============================================================================

pub mod actions;
pub mod date_filter;
pub mod header;
pub mod user_select;

pub use actions::spawn_write;
pub use date_filter::render_date_filter;
pub use header::{apply_theme, render_header};
pub use user_select::{assignee_label, render_user_select};
