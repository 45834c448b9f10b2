// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::scheduler::RecurringTask;
use crate::models::{Demanda, Profile};
use crate::services::RealtimeChannel;
use crate::state::events::{ActiveView, EventBus};
use crate::state::subscription::ChannelSlot;
use crate::state::view_state::{KanbanState, ViewStates};
use crate::state::AuthState;
use crate::utils::constants::THEME_STORAGE_KEY;
use crate::utils::storage::{load_string, save_string};

/// Tipo de actualización del DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Actualización incremental (solo una región)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, restauración de sesión)
    FullRender,
}

/// Región que se vuelve a pintar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Cabecera: saludo, navegación, tema
    Header,
    /// Vista activa
    Content,
    /// Capa de modales
    Modal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_value(value: &str) -> Self {
        if value == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icono del botón: luna en oscuro, sol en claro
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }
}

/// Pestaña del modal de detalles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Detalhes,
    Anexos,
}

/// Modal abierto (como mucho uno)
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    NovaDemanda,
    Detalhes { demanda: Demanda, tab: DetailTab },
    Editar(Demanda),
    Delegar(Demanda),
    ConfirmarInicio { id: String, titulo: String },
    PdfCronograma,
    PdfDashboard,
    NovoFuncionario,
    EditarCargo(Profile),
}

impl ModalState {
    pub fn detalhes(demanda: Demanda) -> Self {
        ModalState::Detalhes { demanda, tab: DetailTab::Detalhes }
    }

    /// Modal al que vuelve "Cancelar" (edición y delegación vuelven a detalles)
    pub fn parent(&self) -> Option<ModalState> {
        match self {
            ModalState::Editar(d) | ModalState::Delegar(d) => Some(ModalState::detalhes(d.clone())),
            _ => None,
        }
    }
}

type ChangeSubscriber = Rc<dyn Fn(UpdateType)>;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub kanban: KanbanState,
    pub views: ViewStates,
    pub events: EventBus,

    // UI State
    pub active_view: Rc<RefCell<ActiveView>>,
    pub modal: Rc<RefCell<Option<ModalState>>>,
    pub theme: Rc<RefCell<Theme>>,

    // Recursos con ciclo de vida
    pub board_timer: Rc<RefCell<RecurringTask>>,
    pub realtime: ChannelSlot<RealtimeChannel>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<ChangeSubscriber>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        let theme = load_string(THEME_STORAGE_KEY)
            .map(|v| Theme::from_value(&v))
            .unwrap_or_default();

        Self {
            auth: AuthState::new(),
            kanban: KanbanState::default(),
            views: ViewStates::default(),
            events: EventBus::new(),
            active_view: Rc::new(RefCell::new(ActiveView::Kanban)),
            modal: Rc::new(RefCell::new(None)),
            theme: Rc::new(RefCell::new(theme)),
            board_timer: Rc::new(RefCell::new(RecurringTask::new("board-countdown"))),
            realtime: ChannelSlot::new(),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_subscribers(&self) {
        self.notify_subscribers_with_type(UpdateType::FullRender);
    }

    pub fn notify_subscribers_with_type(&self, update_type: UpdateType) {
        let subscribers: Vec<ChangeSubscriber> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback(update_type);
        }
    }

    pub fn notify(&self, region: IncrementalUpdate) {
        self.notify_subscribers_with_type(UpdateType::Incremental(region));
    }

    pub fn get_active_view(&self) -> ActiveView {
        *self.active_view.borrow()
    }

    pub fn set_active_view(&self, view: ActiveView) {
        *self.active_view.borrow_mut() = view;
    }

    pub fn get_modal(&self) -> Option<ModalState> {
        self.modal.borrow().clone()
    }

    /// Abrir/cerrar modal y repintar solo la capa de modales
    pub fn set_modal(&self, modal: Option<ModalState>) {
        *self.modal.borrow_mut() = modal;
        self.notify(IncrementalUpdate::Modal);
    }

    pub fn close_modal(&self) {
        self.set_modal(None);
    }

    /// Cancelar: volver al modal padre o cerrar
    pub fn back_modal(&self) {
        let parent = self.modal.borrow().as_ref().and_then(|m| m.parent());
        self.set_modal(parent);
    }

    pub fn get_theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn toggle_theme(&self) {
        let next = self.get_theme().toggled();
        *self.theme.borrow_mut() = next;
        if let Err(e) = save_string(THEME_STORAGE_KEY, next.as_str()) {
            log::warn!("⚠️ [THEME] {}", e);
        }
        self.notify(IncrementalUpdate::Header);
    }

    /// Parar timers y canales, vaciar datos (logout)
    pub fn reset_session(&self) {
        self.board_timer.borrow_mut().stop();
        self.realtime.unsubscribe();
        self.kanban.list.clear();
        self.views.clear();
        self.auth.logout();
        *self.modal.borrow_mut() = None;
        *self.active_view.borrow_mut() = ActiveView::Kanban;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemandaStatus;
    use crate::viewmodels::aggregation::fixtures::demanda;

    #[test]
    fn test_theme_toggle_and_icon() {
        assert_eq!(Theme::from_value("light"), Theme::Light);
        assert_eq!(Theme::from_value("anything"), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.icon(), "🌙");
    }

    #[test]
    fn test_nested_modals_return_to_details() {
        let d = demanda("d1", DemandaStatus::AFazer, None);
        let parent = ModalState::Delegar(d.clone()).parent();
        assert_eq!(parent, Some(ModalState::Detalhes { demanda: d, tab: DetailTab::Detalhes }));
        assert!(ModalState::NovaDemanda.parent().is_none());
    }
}
