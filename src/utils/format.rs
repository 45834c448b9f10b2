// ============================================================================
// FORMAT - Fechas pt-BR, iniciales, HTML seguro y valores de <input>
// ============================================================================

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// "dd/mm/yyyy HH:MM" en la zona indicada
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string()
}

/// Igual que `format_date` con la zona del navegador
pub fn format_local(instant: &DateTime<Utc>) -> String {
    format_date(instant, &Local)
}

/// Fecha local de hoy
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Hasta dos iniciales en mayúscula, "?" si no hay nombre
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Escapar texto del usuario antes de insertarlo como HTML
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Valor de `<input type="datetime-local">` interpretado en `tz`
pub fn parse_datetime_local<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn to_datetime_local<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format(DATETIME_LOCAL_FORMAT).to_string()
}

/// Valor de `<input type="date">`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn to_date_input(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_format_date_uses_local_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 2, 30, 0).unwrap();
        assert_eq!(format_date(&instant, &brt()), "30/04/2024 23:30");
        assert_eq!(format_date(&instant, &Utc), "01/05/2024 02:30");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ana maria souza"), "AM");
        assert_eq!(initials("  bruno "), "B");
        assert_eq!(initials(""), "?");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x">R&D's</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/b&gt;"
        );
    }

    #[test]
    fn test_datetime_local_round_trip_in_offset() {
        let parsed = parse_datetime_local("2024-06-10T18:00", &brt()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 10, 21, 0, 0).unwrap());
        assert_eq!(to_datetime_local(&parsed, &brt()), "2024-06-10T18:00");
        assert!(parse_datetime_local("", &brt()).is_none());
        assert!(parse_datetime_local("amanhã", &brt()).is_none());
    }

    #[test]
    fn test_date_input() {
        let day = parse_date_input("2024-02-29").unwrap();
        assert_eq!(to_date_input(day), "2024-02-29");
        assert!(parse_date_input("2023-02-29").is_none());
    }
}
