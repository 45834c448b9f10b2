// Timestamps de Supabase: RFC3339 (`+00:00`, `Z`) o sin zona (se asume UTC)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("timestamp inválido: {}", raw)))
}

pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("timestamp inválido: {}", raw))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accepts_offset_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 2, 30, 0).unwrap();
        assert_eq!(parse("2024-05-01T02:30:00+00:00"), Some(expected));
        assert_eq!(parse("2024-05-01T02:30:00Z"), Some(expected));
        assert_eq!(parse("2024-04-30T23:30:00-03:00"), Some(expected));
        assert_eq!(parse("2024-05-01T02:30:00"), Some(expected));
        assert_eq!(parse("2024-05-01 02:30:00.000"), Some(expected));
        assert_eq!(parse("ontem"), None);
    }
}
