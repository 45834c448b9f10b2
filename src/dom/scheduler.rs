// ============================================================================
// SCHEDULER - Tarea periódica con dueño (una sola activa por instancia)
// ============================================================================

use gloo_timers::callback::Interval;

/// Envuelve un `Interval`; reiniciar cancela el anterior y `Drop` lo para
pub struct RecurringTask {
    name: &'static str,
    interval: Option<Interval>,
}

impl RecurringTask {
    pub fn new(name: &'static str) -> Self {
        Self { name, interval: None }
    }

    /// (Re)arrancar con un periodo en ms
    pub fn start<F>(&mut self, period_ms: u32, tick: F)
    where
        F: FnMut() + 'static,
    {
        // Soltar el Interval anterior lo cancela
        self.interval.take();
        self.interval = Some(Interval::new(period_ms, tick));
        log::debug!("⏱️ [SCHEDULER] {} cada {}ms", self.name, period_ms);
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            log::debug!("⏹️ [SCHEDULER] {} detenida", self.name);
        }
    }
}

impl Drop for RecurringTask {
    fn drop(&mut self) {
        self.stop();
    }
}
