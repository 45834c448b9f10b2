// ============================================================================
// COUNTDOWN VIEWMODEL - Tiempo restante hasta la previsión
// ============================================================================
// Función pura de (previsión, estado, ahora). Sin estado guardado:
// cada tick recalcula desde el reloj.
// ============================================================================

use chrono::{DateTime, Utc};
use crate::models::DemandaStatus;

pub const TEXT_DONE: &str = "✅ Demanda concluída";
pub const TEXT_NO_DEADLINE: &str = "Sem previsão";
pub const TEXT_EXPIRED: &str = "Tempo restante: Tempo esgotado!";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Countdown {
    pub text: String,
    pub expired: bool,
    pub done: bool,
}

impl Countdown {
    /// Clases CSS del bloque del timer
    pub fn timer_class(&self) -> &'static str {
        if self.done {
            "demand-card-timer timer-concluida"
        } else if self.expired {
            "demand-card-timer timer-esgotado"
        } else {
            "demand-card-timer"
        }
    }
}

/// Calcular el countdown de una demanda
pub fn countdown(
    deadline: Option<DateTime<Utc>>,
    status: DemandaStatus,
    now: DateTime<Utc>,
) -> Countdown {
    if status.is_done() {
        return Countdown { text: TEXT_DONE.to_string(), expired: false, done: true };
    }

    let deadline = match deadline {
        Some(d) => d,
        None => return Countdown { text: TEXT_NO_DEADLINE.to_string(), expired: false, done: false },
    };

    let diff_ms = (deadline - now).num_milliseconds();
    if diff_ms <= 0 {
        return Countdown { text: TEXT_EXPIRED.to_string(), expired: true, done: false };
    }

    Countdown {
        text: format!("Tempo restante: {}", format_remaining(diff_ms / 1000)),
        expired: false,
        done: false,
    }
}

/// `{d}d HH:MM:SS`, sin el segmento de días cuando es cero
pub fn format_remaining(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_25_hours_ahead_shows_one_day() {
        let c = countdown(Some(now() + Duration::hours(25)), DemandaStatus::AFazer, now());
        assert_eq!(c.text, "Tempo restante: 1d 01:00:00");
        assert!(!c.expired);
        assert!(!c.done);
    }

    #[test]
    fn test_past_deadline_is_expired() {
        let c = countdown(Some(now() - Duration::hours(1)), DemandaStatus::AFazer, now());
        assert!(c.expired);
        assert_eq!(c.text, TEXT_EXPIRED);
        assert_eq!(c.timer_class(), "demand-card-timer timer-esgotado");
    }

    #[test]
    fn test_approved_ignores_deadline() {
        for deadline in [None, Some(now() - Duration::days(3)), Some(now() + Duration::days(3))] {
            let c = countdown(deadline, DemandaStatus::Aprovado, now());
            assert!(c.done);
            assert!(!c.expired);
            assert_eq!(c.text, TEXT_DONE);
        }
    }

    #[test]
    fn test_no_deadline() {
        let c = countdown(None, DemandaStatus::EmAndamento, now());
        assert_eq!(c.text, TEXT_NO_DEADLINE);
        assert!(!c.expired);
    }

    #[test]
    fn test_days_segment_omitted_when_zero() {
        assert_eq!(format_remaining(59), "00:00:59");
        assert_eq!(format_remaining(3 * 3600 + 5 * 60 + 7), "03:05:07");
        assert_eq!(format_remaining(2 * 86_400), "2d 00:00:00");
    }

    #[test]
    fn test_ticks_decrease_until_expired_exactly_once() {
        let deadline = now() + Duration::seconds(5);
        let mut previous: Option<String> = None;
        let mut expired_ticks = 0;
        for tick in 0..8 {
            let c = countdown(Some(deadline), DemandaStatus::Fixo, now() + Duration::seconds(tick));
            if c.expired {
                expired_ticks += 1;
                if expired_ticks == 1 {
                    assert_eq!(tick, 5);
                }
                continue;
            }
            if let Some(prev) = &previous {
                assert!(c.text < *prev, "{} should be below {}", c.text, prev);
            }
            previous = Some(c.text);
        }
        // Al cruzar el límite queda esgotado en los ticks siguientes
        assert_eq!(expired_ticks, 3);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let deadline = Some(now() + Duration::minutes(90));
        let a = countdown(deadline, DemandaStatus::EmRevisao, now());
        let b = countdown(deadline, DemandaStatus::EmRevisao, now());
        assert_eq!(a, b);
        assert_eq!(a.text, "Tempo restante: 01:30:00");
    }
}
