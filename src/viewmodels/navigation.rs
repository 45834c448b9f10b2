// ============================================================================
// NAVIGATION VIEWMODEL - Cambio de vista con mount / unmount
// ============================================================================
// unmount libera lo que la vista abrió (timer, canal realtime, cargas en
// vuelo); mount lanza su carga inicial
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::services::RealtimeChannel;
use crate::state::{ActiveView, AppEvent, AppState, IncrementalUpdate};
use crate::utils::constants::REALTIME_RECONNECT_MS;
use crate::viewmodels::demanda_viewmodel::DemandaViewModel;
use crate::viewmodels::loaders;
use crate::viewmodels::session_viewmodel::SessionViewModel;

/// Pulsar el botón de la vista activa vuelve al kanban
pub fn resolve_target(current: ActiveView, requested: ActiveView) -> ActiveView {
    if current == requested {
        ActiveView::Kanban
    } else {
        requested
    }
}

pub struct NavigationViewModel {
    state: AppState,
}

impl NavigationViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    pub fn switch_to(&self, requested: ActiveView) {
        let current = self.state.get_active_view();
        let next = resolve_target(current, requested);
        if next == current {
            return;
        }

        log::info!("🧭 [NAV] {} → {}", current.as_str(), next.as_str());
        self.unmount(current);
        self.state.set_active_view(next);
        self.state.notify(IncrementalUpdate::Header);
        self.state.notify(IncrementalUpdate::Content);
        self.state.events.publish(AppEvent::ViewChanged(next));
        self.mount(next);
    }

    /// Carga inicial (y canal realtime en "Por Usuário")
    pub fn mount(&self, view: ActiveView) {
        let state = self.state.clone();
        match view {
            ActiveView::Kanban => spawn_local(async move {
                DemandaViewModel::new(&state).load_kanban().await;
            }),
            ActiveView::Funcionarios => spawn_local(async move {
                SessionViewModel::new(&state).load_users().await;
            }),
            ActiveView::UserTasks => {
                self.open_change_feed();
                self.mount_data(view);
            }
            // Al entrar en BI siempre se parte de la visión general
            ActiveView::Bi => {
                self.state.views.bi.set_filter_user(None);
                self.mount_data(view);
            }
            _ => self.mount_data(view),
        }
    }

    pub fn unmount(&self, view: ActiveView) {
        match view {
            ActiveView::Kanban => {
                self.state.board_timer.borrow_mut().stop();
                self.state.kanban.list.abandon();
            }
            ActiveView::UserTasks => {
                if self.state.realtime.is_active() {
                    self.state.realtime.unsubscribe();
                    log::info!("📴 [REALTIME] Canal fechado");
                }
                self.state.views.user_tasks.list.abandon();
            }
            ActiveView::Cronograma => self.state.views.cronograma.list.abandon(),
            ActiveView::Dashboard => self.state.views.dashboard.list.abandon(),
            ActiveView::Bi => self.state.views.bi.list.abandon(),
            ActiveView::ApprovalDeck => self.state.views.approval.list.abandon(),
            ActiveView::Funcionarios => {}
        }
    }

    /// Tras una escritura: el kanban ya se recargó, las demás vistas no
    pub fn refresh_active(&self) {
        let view = self.state.get_active_view();
        if view != ActiveView::Kanban && view != ActiveView::Funcionarios {
            self.mount_data(view);
        }
    }

    fn mount_data(&self, view: ActiveView) {
        let state = self.state.clone();
        match view {
            ActiveView::UserTasks => spawn_local(async move { loaders::load_user_tasks(&state).await }),
            ActiveView::Cronograma => spawn_local(async move { loaders::load_cronograma(&state).await }),
            ActiveView::Dashboard => spawn_local(async move { loaders::load_dashboard(&state).await }),
            ActiveView::Bi => spawn_local(async move { loaders::load_bi(&state).await }),
            ActiveView::ApprovalDeck => spawn_local(async move { loaders::load_approval(&state).await }),
            ActiveView::Kanban | ActiveView::Funcionarios => {}
        }
    }

    fn open_change_feed(&self) {
        let state = self.state.clone();
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            let state = state.clone();
            spawn_local(async move { loaders::load_user_tasks(&state).await });
        });
        let token = self.state.auth.access_token();

        let opened = self.state.realtime.subscribe(|generation| {
            let on_closed = self.on_channel_closed(generation);
            RealtimeChannel::subscribe(token, on_change, on_closed)
        });
        match opened {
            Ok(true) => log::info!("📡 [REALTIME] Canal aberto"),
            Ok(false) => {}
            Err(e) => log::error!("❌ [REALTIME] Não foi possível abrir o canal: {}", e),
        }
    }

    /// Cierre del servidor: liberar el slot y, si "Por Usuário" sigue activa, reabrir
    fn on_channel_closed(&self, generation: u64) -> Rc<dyn Fn()> {
        let state = self.state.clone();
        Rc::new(move || {
            if !state.realtime.release(generation) {
                return;
            }
            log::warn!("📴 [REALTIME] Canal caído, reabrindo em {} ms", REALTIME_RECONNECT_MS);
            let state = state.clone();
            Timeout::new(REALTIME_RECONNECT_MS, move || {
                if state.get_active_view() != ActiveView::UserTasks {
                    return;
                }
                let nav = NavigationViewModel::new(&state);
                nav.open_change_feed();
                // Lo que cambió mientras no había canal
                nav.mount_data(ActiveView::UserTasks);
            })
            .forget();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_returns_to_kanban() {
        assert_eq!(resolve_target(ActiveView::Kanban, ActiveView::Bi), ActiveView::Bi);
        assert_eq!(resolve_target(ActiveView::Bi, ActiveView::Bi), ActiveView::Kanban);
        assert_eq!(resolve_target(ActiveView::Bi, ActiveView::Cronograma), ActiveView::Cronograma);
        assert_eq!(resolve_target(ActiveView::Kanban, ActiveView::Kanban), ActiveView::Kanban);
    }
}
