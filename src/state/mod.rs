// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod events;
pub mod request_fence;
pub mod subscription;
pub mod auth_state;
pub mod view_state;
pub mod app_state;

pub use events::*;
pub use request_fence::*;
pub use subscription::*;
pub use auth_state::*;
pub use view_state::*;
pub use app_state::*;
