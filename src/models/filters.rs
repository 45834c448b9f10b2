// ============================================================================
// FILTERS - Filtros de cada vista y su traducción a rangos de fechas
// ============================================================================

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use crate::models::demanda::DemandaStatus;

/// Modo rápido del filtro de fecha (kanban y "Por Usuário")
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DateFilterMode {
    Todos,
    Hoje,
    Ontem,
    Periodo,
}

impl DateFilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilterMode::Todos => "todos",
            DateFilterMode::Hoje => "hoje",
            DateFilterMode::Ontem => "ontem",
            DateFilterMode::Periodo => "periodo",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "hoje" => DateFilterMode::Hoje,
            "ontem" => DateFilterMode::Ontem,
            "periodo" => DateFilterMode::Periodo,
            _ => DateFilterMode::Todos,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct DateFilter {
    pub mode: DateFilterMode,
    pub inicio: Option<NaiveDate>,
    pub fim: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(mode: DateFilterMode) -> Self {
        Self { mode, inicio: None, fim: None }
    }

    /// Resolver a un rango de días respecto a `today` (fecha local)
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self.mode {
            DateFilterMode::Todos => DateRange::default(),
            DateFilterMode::Hoje => DateRange::day(today),
            DateFilterMode::Ontem => DateRange::day(today - Duration::days(1)),
            DateFilterMode::Periodo => DateRange { start: self.inicio, end: self.fim },
        }
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new(DateFilterMode::Todos)
    }
}

/// Rango de días inclusivo; los extremos ausentes no filtran
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn day(day: NaiveDate) -> Self {
        Self { start: Some(day), end: Some(day) }
    }

    /// Límites `{d}T00:00:00` / `{d}T23:59:59`
    pub fn bounds(&self) -> TimeBounds {
        TimeBounds {
            gte: self.start.map(|d| format!("{}T00:00:00", d.format("%Y-%m-%d"))),
            lte: self.end.map(|d| format!("{}T23:59:59", d.format("%Y-%m-%d"))),
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }
}

/// Límites listos para `gte.` / `lte.` en PostgREST
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TimeBounds {
    pub gte: Option<String>,
    pub lte: Option<String>,
}

impl TimeBounds {
    /// Instantes UTC entre dos momentos locales
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            gte: Some(start.to_rfc3339_opts(SecondsFormat::Millis, true)),
            lte: Some(end.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Mes local completo: día 1 00:00:00 hasta el último día 23:59:59
    pub fn local_month<Tz: TimeZone>(year: i32, month: u32, tz: &Tz) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = last_day_of_month(year, month)?;
        Self::local_days(first, last, tz)
    }

    /// Año local completo
    pub fn local_year<Tz: TimeZone>(year: i32, tz: &Tz) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Self::local_days(first, last, tz)
    }

    fn local_days<Tz: TimeZone>(first: NaiveDate, last: NaiveDate, tz: &Tz) -> Option<Self> {
        let start = tz.from_local_datetime(&first.and_hms_opt(0, 0, 0)?).earliest()?;
        let end = tz.from_local_datetime(&last.and_hms_opt(23, 59, 59)?).latest()?;
        Some(Self::between(start.with_timezone(&Utc), end.with_timezone(&Utc)))
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Filtros del kanban personal
#[derive(Clone, PartialEq, Debug, Default)]
pub struct KanbanFilters {
    pub date: DateFilter,
}

/// Filtros de "Por Usuário" (por defecto: hoy)
#[derive(Clone, PartialEq, Debug)]
pub struct UserTasksFilters {
    pub date: DateFilter,
    pub usuario: Option<String>,
}

impl Default for UserTasksFilters {
    fn default() -> Self {
        Self { date: DateFilter::new(DateFilterMode::Hoje), usuario: None }
    }
}

/// Estado seleccionado en el cronograma
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CronogramaStatusFilter {
    Aprovado,
    EmAndamento,
    Todos,
}

impl CronogramaStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CronogramaStatusFilter::Aprovado => "APROVADO",
            CronogramaStatusFilter::EmAndamento => "EM_ANDAMENTO",
            CronogramaStatusFilter::Todos => "TODOS",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "EM_ANDAMENTO" => CronogramaStatusFilter::EmAndamento,
            "TODOS" => CronogramaStatusFilter::Todos,
            _ => CronogramaStatusFilter::Aprovado,
        }
    }

    pub fn statuses(&self) -> Vec<DemandaStatus> {
        match self {
            CronogramaStatusFilter::Aprovado => vec![DemandaStatus::Aprovado],
            CronogramaStatusFilter::EmAndamento => vec![DemandaStatus::EmAndamento],
            CronogramaStatusFilter::Todos => vec![DemandaStatus::Aprovado, DemandaStatus::EmAndamento],
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct CronogramaFilters {
    pub usuario: Option<String>,
    pub month: u32,
    pub year: i32,
    pub status: CronogramaStatusFilter,
}

impl CronogramaFilters {
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            usuario: None,
            month: today.month(),
            year: today.year(),
            status: CronogramaStatusFilter::Aprovado,
        }
    }
}

/// Filtros de "Meu Painel": día (prioridad) > mes (> 0) > año
#[derive(Clone, PartialEq, Debug)]
pub struct DashboardFilters {
    pub day: Option<NaiveDate>,
    /// 0 = todo el año
    pub month: u32,
    pub year: i32,
}

impl DashboardFilters {
    pub fn for_today(today: NaiveDate) -> Self {
        Self { day: None, month: today.month(), year: today.year() }
    }

    pub fn created_bounds<Tz: TimeZone>(&self, tz: &Tz) -> Option<TimeBounds> {
        if let Some(day) = self.day {
            return Some(DateRange::day(day).bounds());
        }
        if self.month > 0 {
            TimeBounds::local_month(self.year, self.month, tz)
        } else {
            TimeBounds::local_year(self.year, tz)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quick_modes_resolve_against_today() {
        let today = date(2024, 3, 1);
        assert_eq!(DateFilter::new(DateFilterMode::Todos).resolve(today), DateRange::default());
        assert_eq!(DateFilter::new(DateFilterMode::Hoje).resolve(today), DateRange::day(today));
        assert_eq!(
            DateFilter::new(DateFilterMode::Ontem).resolve(today),
            DateRange::day(date(2024, 2, 29))
        );
        let periodo = DateFilter {
            mode: DateFilterMode::Periodo,
            inicio: Some(date(2024, 2, 10)),
            fim: None,
        };
        let range = periodo.resolve(today);
        assert_eq!(range.start, Some(date(2024, 2, 10)));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_day_bounds_format() {
        let bounds = DateRange::day(date(2024, 7, 9)).bounds();
        assert_eq!(bounds.gte.as_deref(), Some("2024-07-09T00:00:00"));
        assert_eq!(bounds.lte.as_deref(), Some("2024-07-09T23:59:59"));
        assert_eq!(DateRange::default().bounds(), TimeBounds::default());
    }

    #[test]
    fn test_local_month_converts_to_utc() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let bounds = TimeBounds::local_month(2024, 2, &brt).unwrap();
        assert_eq!(bounds.gte.as_deref(), Some("2024-02-01T03:00:00.000Z"));
        assert_eq!(bounds.lte.as_deref(), Some("2024-03-01T02:59:59.000Z"));
        assert_eq!(last_day_of_month(2023, 12), Some(date(2023, 12, 31)));
        assert!(TimeBounds::local_month(2024, 13, &brt).is_none());
    }

    #[test]
    fn test_dashboard_priority_day_month_year() {
        let mut filters = DashboardFilters { day: Some(date(2024, 5, 2)), month: 5, year: 2024 };
        assert_eq!(
            filters.created_bounds(&Utc).unwrap().gte.as_deref(),
            Some("2024-05-02T00:00:00")
        );
        filters.day = None;
        assert_eq!(
            filters.created_bounds(&Utc).unwrap().lte.as_deref(),
            Some("2024-05-31T23:59:59.000Z")
        );
        filters.month = 0;
        let year = filters.created_bounds(&Utc).unwrap();
        assert_eq!(year.gte.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(year.lte.as_deref(), Some("2024-12-31T23:59:59.000Z"));
    }

    #[test]
    fn test_cronograma_status_sets() {
        assert_eq!(CronogramaStatusFilter::from_value("xyz"), CronogramaStatusFilter::Aprovado);
        assert_eq!(
            CronogramaStatusFilter::Todos.statuses(),
            vec![DemandaStatus::Aprovado, DemandaStatus::EmAndamento]
        );
        assert!(DateRange { start: Some(date(2024, 2, 2)), end: Some(date(2024, 2, 1)) }.is_inverted());
    }
}
