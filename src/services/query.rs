// ============================================================================
// QUERY - Parámetros de PostgREST (select, filtros, orden)
// ============================================================================

use crate::models::{DemandaStatus, TimeBounds};

/// Lista ordenada de pares `clave=valor` para la query string
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.pairs.push((key.to_string(), value));
        self
    }

    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns.to_string())
    }

    pub fn eq(self, column: &str, value: &str) -> Self {
        self.push(column, format!("eq.{}", value))
    }

    pub fn gte(self, column: &str, value: &str) -> Self {
        self.push(column, format!("gte.{}", value))
    }

    pub fn lte(self, column: &str, value: &str) -> Self {
        self.push(column, format!("lte.{}", value))
    }

    /// `in.(a,b)`; con un solo valor se usa `eq`
    pub fn in_list(self, column: &str, values: &[&str]) -> Self {
        match values {
            [single] => self.eq(column, single),
            _ => self.push(column, format!("in.({})", values.join(","))),
        }
    }

    pub fn statuses(self, statuses: &[DemandaStatus]) -> Self {
        let tags: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        self.in_list("status", &tags)
    }

    /// Aplica los extremos presentes de un rango
    pub fn within(self, column: &str, bounds: &TimeBounds) -> Self {
        let query = match &bounds.gte {
            Some(gte) => self.gte(column, gte),
            None => self,
        };
        match &bounds.lte {
            Some(lte) => query.lte(column, lte),
            None => query,
        }
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.push("order", format!("{}.{}", column, direction))
    }

    pub fn on_conflict(self, column: &str) -> Self {
        self.push("on_conflict", column.to_string())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(query: &Query) -> Vec<(String, String)> {
        query.pairs().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_kanban_query_shape() {
        let bounds = TimeBounds {
            gte: Some("2024-05-01T00:00:00".into()),
            lte: Some("2024-05-01T23:59:59".into()),
        };
        let query = Query::new()
            .select("*")
            .eq("atribuido_para", "u1")
            .within("created_at", &bounds)
            .order("created_at", false);
        assert_eq!(
            collect(&query),
            vec![
                ("select".into(), "*".into()),
                ("atribuido_para".into(), "eq.u1".into()),
                ("created_at".into(), "gte.2024-05-01T00:00:00".into()),
                ("created_at".into(), "lte.2024-05-01T23:59:59".into()),
                ("order".into(), "created_at.desc".into()),
            ]
        );
    }

    #[test]
    fn test_open_bounds_add_nothing() {
        let query = Query::new().within("created_at", &TimeBounds::default());
        assert!(query.is_empty());
        let half = TimeBounds { gte: None, lte: Some("x".into()) };
        assert_eq!(collect(&Query::new().within("updated_at", &half)), vec![("updated_at".into(), "lte.x".into())]);
    }

    #[test]
    fn test_status_lists() {
        let both = Query::new().statuses(&[DemandaStatus::Aprovado, DemandaStatus::EmAndamento]);
        assert_eq!(collect(&both), vec![("status".into(), "in.(APROVADO,EM_ANDAMENTO)".into())]);
        let one = Query::new().statuses(&[DemandaStatus::ParaAprovacao]);
        assert_eq!(collect(&one), vec![("status".into(), "eq.PARA_APROVACAO".into())]);
    }
}
