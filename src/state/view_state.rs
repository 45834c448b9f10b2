// ============================================================================
// VIEW STATE - Datos y filtros de cada vista, con cargas ordenadas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{
    CronogramaFilters, DashboardFilters, Demanda, DemandaStatus, KanbanFilters, UserTasksFilters,
};
use crate::state::request_fence::{RequestSequence, RequestTicket};

/// Lista de demandas cuya carga solo acepta la respuesta más reciente
#[derive(Clone, Default)]
pub struct FencedList {
    items: Rc<RefCell<Vec<Demanda>>>,
    loaded: Rc<RefCell<bool>>,
    sequence: RequestSequence,
}

impl FencedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empieza una carga; el ticket decide si su resultado se aplica
    pub fn begin(&self) -> RequestTicket {
        self.sequence.issue()
    }

    /// Aplica el resultado si el ticket sigue vigente
    pub fn commit(&self, ticket: RequestTicket, items: Vec<Demanda>) -> bool {
        if !self.sequence.is_latest(ticket) {
            log::debug!("⏭️ [STATE] Respuesta obsoleta descartada");
            return false;
        }
        *self.items.borrow_mut() = items;
        *self.loaded.borrow_mut() = true;
        true
    }

    /// Carga vigente fallida: se dejan los datos previos y se quita el "Carregando"
    pub fn fail(&self, ticket: RequestTicket) -> bool {
        if !self.sequence.is_latest(ticket) {
            return false;
        }
        *self.loaded.borrow_mut() = true;
        true
    }

    /// Vista desmontada: las cargas en vuelo ya no escriben
    pub fn abandon(&self) {
        self.sequence.invalidate();
    }

    pub fn clear(&self) {
        self.abandon();
        self.items.borrow_mut().clear();
        *self.loaded.borrow_mut() = false;
    }

    pub fn get(&self) -> Vec<Demanda> {
        self.items.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[Demanda]) -> R) -> R {
        f(&self.items.borrow())
    }

    pub fn is_loaded(&self) -> bool {
        *self.loaded.borrow()
    }
}

/// Kanban personal (el "Task Store")
#[derive(Clone)]
pub struct KanbanState {
    pub list: FencedList,
    pub filters: Rc<RefCell<KanbanFilters>>,
    /// Sub-lista visible en la columna A Fazer (A_FAZER o FIXO)
    pub todo_lane: Rc<RefCell<DemandaStatus>>,
    /// Tarjeta que se está arrastrando
    pub dragging: Rc<RefCell<Option<String>>>,
}

impl Default for KanbanState {
    fn default() -> Self {
        Self {
            list: FencedList::new(),
            filters: Rc::new(RefCell::new(KanbanFilters::default())),
            todo_lane: Rc::new(RefCell::new(DemandaStatus::AFazer)),
            dragging: Rc::new(RefCell::new(None)),
        }
    }
}

impl KanbanState {
    pub fn get_filters(&self) -> KanbanFilters {
        self.filters.borrow().clone()
    }

    pub fn set_filters(&self, filters: KanbanFilters) {
        *self.filters.borrow_mut() = filters;
    }

    pub fn set_todo_lane(&self, lane: DemandaStatus) {
        *self.todo_lane.borrow_mut() = lane;
    }

    pub fn get_todo_lane(&self) -> DemandaStatus {
        *self.todo_lane.borrow()
    }

    pub fn set_dragging(&self, id: Option<String>) {
        *self.dragging.borrow_mut() = id;
    }

    pub fn take_dragging(&self) -> Option<String> {
        self.dragging.borrow_mut().take()
    }

    pub fn find(&self, id: &str) -> Option<Demanda> {
        self.list.with(|items| items.iter().find(|d| d.id == id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct UserTasksState {
    pub list: FencedList,
    pub filters: Rc<RefCell<UserTasksFilters>>,
}

impl UserTasksState {
    pub fn get_filters(&self) -> UserTasksFilters {
        self.filters.borrow().clone()
    }

    pub fn set_filters(&self, filters: UserTasksFilters) {
        *self.filters.borrow_mut() = filters;
    }
}

/// Los filtros se inicializan al montar (dependen de la fecha y de los usuarios)
#[derive(Clone, Default)]
pub struct CronogramaState {
    pub list: FencedList,
    pub filters: Rc<RefCell<Option<CronogramaFilters>>>,
}

impl CronogramaState {
    pub fn get_filters(&self) -> Option<CronogramaFilters> {
        self.filters.borrow().clone()
    }

    pub fn set_filters(&self, filters: CronogramaFilters) {
        *self.filters.borrow_mut() = Some(filters);
    }
}

#[derive(Clone, Default)]
pub struct DashboardState {
    pub list: FencedList,
    pub filters: Rc<RefCell<Option<DashboardFilters>>>,
}

impl DashboardState {
    pub fn get_filters(&self) -> Option<DashboardFilters> {
        self.filters.borrow().clone()
    }

    pub fn set_filters(&self, filters: DashboardFilters) {
        *self.filters.borrow_mut() = Some(filters);
    }
}

#[derive(Clone, Default)]
pub struct BiState {
    pub list: FencedList,
    /// Filtro por responsable en el cliente (None = todos)
    pub filter_user: Rc<RefCell<Option<String>>>,
}

impl BiState {
    pub fn get_filter_user(&self) -> Option<String> {
        self.filter_user.borrow().clone()
    }

    pub fn set_filter_user(&self, user: Option<String>) {
        *self.filter_user.borrow_mut() = user;
    }
}

#[derive(Clone, Default)]
pub struct ApprovalState {
    pub list: FencedList,
}

/// Estado de todas las vistas secundarias
#[derive(Clone, Default)]
pub struct ViewStates {
    pub user_tasks: UserTasksState,
    pub cronograma: CronogramaState,
    pub dashboard: DashboardState,
    pub bi: BiState,
    pub approval: ApprovalState,
}

impl ViewStates {
    pub fn clear(&self) {
        self.user_tasks.list.clear();
        self.cronograma.list.clear();
        self.dashboard.list.clear();
        self.bi.list.clear();
        self.approval.list.clear();
        *self.cronograma.filters.borrow_mut() = None;
        *self.dashboard.filters.borrow_mut() = None;
        self.user_tasks.set_filters(UserTasksFilters::default());
        self.bi.set_filter_user(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::aggregation::fixtures::demanda;

    #[test]
    fn test_stale_response_is_not_committed() {
        let list = FencedList::new();
        let slow = list.begin();
        let fast = list.begin();
        assert!(list.commit(fast, vec![demanda("new", DemandaStatus::AFazer, None)]));
        assert!(!list.commit(slow, vec![demanda("old", DemandaStatus::AFazer, None)]));
        assert_eq!(list.get()[0].id, "new");
        assert!(list.is_loaded());
    }

    #[test]
    fn test_abandon_blocks_in_flight_load() {
        let list = FencedList::new();
        let ticket = list.begin();
        list.abandon();
        assert!(!list.commit(ticket, vec![demanda("x", DemandaStatus::Fixo, None)]));
        assert!(!list.fail(ticket));
        assert!(list.get().is_empty());
    }

    #[test]
    fn test_kanban_find_and_drag() {
        let kanban = KanbanState::default();
        let ticket = kanban.list.begin();
        kanban.list.commit(ticket, vec![demanda("d1", DemandaStatus::EmAndamento, None)]);
        assert_eq!(kanban.find("d1").map(|d| d.status), Some(DemandaStatus::EmAndamento));
        kanban.set_dragging(Some("d1".into()));
        assert_eq!(kanban.take_dragging().as_deref(), Some("d1"));
        assert!(kanban.take_dragging().is_none());
        assert_eq!(kanban.get_todo_lane(), DemandaStatus::AFazer);
    }
}
