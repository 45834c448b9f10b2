// ============================================================================
// EVENT BUS - Eventos de la aplicación entre vistas
// ============================================================================
// Las vistas no se consultan entre sí: publican un `AppEvent` y quien esté
// montado decide si recarga.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Vista principal activa
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ActiveView {
    #[default]
    Kanban,
    UserTasks,
    Cronograma,
    Dashboard,
    Bi,
    Funcionarios,
    ApprovalDeck,
}

impl ActiveView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Kanban => "kanban",
            ActiveView::UserTasks => "user-tasks",
            ActiveView::Cronograma => "cronograma",
            ActiveView::Dashboard => "dashboard",
            ActiveView::Bi => "bi",
            ActiveView::Funcionarios => "funcionarios",
            ActiveView::ApprovalDeck => "approval-deck",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum AppEvent {
    /// Alguna escritura sobre `demandas` terminó bien
    DemandasChanged,
    /// La lista de perfiles cambió (alta, baja, cargo)
    UsersChanged,
    ProfileLoaded,
    ViewChanged(ActiveView),
    SessionEnded,
}

type Handler = Rc<dyn Fn(&AppEvent)>;

#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Rc<RefCell<Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&AppEvent) + 'static,
    {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Copia la lista antes de llamar: un handler puede suscribir o publicar
    pub fn publish(&self, event: AppEvent) {
        log::debug!("📣 [EVENTS] {:?}", event);
        let handlers: Vec<Handler> = self.handlers.borrow().clone();
        for handler in handlers {
            handler(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_publish_reaches_every_handler() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.subscribe(move |event| seen.borrow_mut().push((tag, event.clone())));
        }
        bus.publish(AppEvent::DemandasChanged);
        assert_eq!(
            *seen.borrow(),
            vec![("a", AppEvent::DemandasChanged), ("b", AppEvent::DemandasChanged)]
        );
    }

    #[test]
    fn test_handler_may_publish_and_subscribe() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        {
            let inner_bus = bus.clone();
            let count = count.clone();
            bus.subscribe(move |event| {
                count.set(count.get() + 1);
                if *event == AppEvent::ProfileLoaded {
                    inner_bus.subscribe(|_| {});
                    inner_bus.publish(AppEvent::ViewChanged(ActiveView::Kanban));
                }
            });
        }
        bus.publish(AppEvent::ProfileLoaded);
        assert_eq!(count.get(), 2);
    }
}
