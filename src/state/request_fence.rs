// ============================================================================
// REQUEST FENCE - Solo la última petición de una vista puede escribir estado
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

/// Ticket emitido al iniciar una carga
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RequestTicket(u64);

#[derive(Clone, Default, Debug)]
pub struct RequestSequence {
    latest: Rc<Cell<u64>>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Desmontar la vista: ninguna respuesta pendiente vale ya
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_ticket_is_stale() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_invalidate_drops_in_flight() {
        let seq = RequestSequence::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_latest(ticket));
        assert!(seq.is_latest(seq.issue()));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let seq = RequestSequence::new();
        let ticket = seq.clone().issue();
        assert!(seq.is_latest(ticket));
    }
}
