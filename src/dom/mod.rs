// ============================================================================
// DOM MODULE - Helpers para manipulación DOM
// ============================================================================

pub mod element;
pub mod builder;
pub mod events;
pub mod incremental;
pub mod scheduler;
pub mod dialogs;

pub use element::*;
pub use builder::*;
pub use events::*;
pub use incremental::*;
pub use scheduler::RecurringTask;
pub use dialogs::*;
