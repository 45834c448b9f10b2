// ============================================================================
// CHANNEL SLOT - Como mucho una suscripción viva por canal
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// El recurso se libera con su `Drop` al vaciar el slot.
/// Cada apertura recibe una generación nueva para poder liberarla después sin
/// tocar un canal abierto más tarde.
pub struct ChannelSlot<T> {
    slot: Rc<RefCell<Option<(u64, T)>>>,
    generation: Rc<Cell<u64>>,
}

impl<T> Clone for ChannelSlot<T> {
    fn clone(&self) -> Self {
        Self { slot: self.slot.clone(), generation: self.generation.clone() }
    }
}

impl<T> Default for ChannelSlot<T> {
    fn default() -> Self {
        Self { slot: Rc::new(RefCell::new(None)), generation: Rc::new(Cell::new(0)) }
    }
}

impl<T> ChannelSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abre el canal solo si no hay uno; devuelve si se abrió ahora
    pub fn subscribe<E, F>(&self, open: F) -> Result<bool, E>
    where
        F: FnOnce(u64) -> Result<T, E>,
    {
        if self.slot.borrow().is_some() {
            log::debug!("📡 [REALTIME] Canal ya activo, ignorando suscripción duplicada");
            return Ok(false);
        }
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let channel = open(generation)?;
        *self.slot.borrow_mut() = Some((generation, channel));
        Ok(true)
    }

    /// Vaciar el slot solo si todavía guarda la apertura `generation`
    pub fn release(&self, generation: u64) -> bool {
        let current = matches!(&*self.slot.borrow(), Some((g, _)) if *g == generation);
        if current {
            self.unsubscribe();
        }
        current
    }

    pub fn unsubscribe(&self) {
        // Sacar el valor antes de soltarlo: su Drop no debe ver el borrow activo
        let previous = self.slot.borrow_mut().take();
        drop(previous);
    }

    pub fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Channel(Rc<Cell<u32>>);

    impl Drop for Channel {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_second_subscribe_is_noop() {
        let slot = ChannelSlot::new();
        let opened = Cell::new(0);
        let dropped = Rc::new(Cell::new(0));
        let open = |_generation: u64| -> Result<Channel, ()> {
            opened.set(opened.get() + 1);
            Ok(Channel(dropped.clone()))
        };
        assert_eq!(slot.subscribe(open), Ok(true));
        assert_eq!(slot.subscribe(open), Ok(false));
        assert_eq!(opened.get(), 1);
        assert!(slot.is_active());
    }

    #[test]
    fn test_unsubscribe_releases_and_allows_reopen() {
        let slot = ChannelSlot::new();
        let dropped = Rc::new(Cell::new(0));
        slot.subscribe(|_| Ok::<_, ()>(Channel(dropped.clone()))).unwrap();
        slot.unsubscribe();
        assert_eq!(dropped.get(), 1);
        assert!(!slot.is_active());
        slot.unsubscribe();
        assert_eq!(dropped.get(), 1);
        assert_eq!(slot.subscribe(|_| Ok::<_, ()>(Channel(dropped.clone()))), Ok(true));
    }

    #[test]
    fn test_failed_open_leaves_slot_empty() {
        let slot: ChannelSlot<Channel> = ChannelSlot::new();
        assert_eq!(slot.subscribe(|_| Err("socket")), Err("socket"));
        assert!(!slot.is_active());
    }

    #[test]
    fn test_server_close_releases_only_its_own_channel() {
        let slot = ChannelSlot::new();
        let dropped = Rc::new(Cell::new(0));
        let mut first = 0;
        slot.subscribe(|g| {
            first = g;
            Ok::<_, ()>(Channel(dropped.clone()))
        })
        .unwrap();

        // El servidor cerró el socket: el slot queda libre y se puede reabrir
        assert!(slot.release(first));
        assert!(!slot.is_active());
        assert_eq!(dropped.get(), 1);

        let mut second = 0;
        slot.subscribe(|g| {
            second = g;
            Ok::<_, ()>(Channel(dropped.clone()))
        })
        .unwrap();
        assert_ne!(first, second);

        // Un aviso tardío del primer socket no toca el canal nuevo
        assert!(!slot.release(first));
        assert!(slot.is_active());
        assert_eq!(dropped.get(), 1);
    }
}
