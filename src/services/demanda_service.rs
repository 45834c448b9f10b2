// ============================================================================
// DEMANDA SERVICE - Tabla `demandas` (lecturas por vista y escrituras)
// ============================================================================

use crate::error::ApiResult;
use crate::models::{Demanda, DemandaPatch, DemandaStatus, NewDemanda, TimeBounds};
use crate::services::query::Query;
use crate::services::supabase_client::SupabaseClient;
use crate::utils::constants::{JOIN_ATRIBUIDO, JOIN_CRIADOR, TABLE_DEMANDAS};

/// `*` más los joins de creador y responsable
pub fn select_with_profiles() -> String {
    format!("*,{},{}", JOIN_CRIADOR, JOIN_ATRIBUIDO)
}

fn base_query() -> Query {
    Query::new().select(&select_with_profiles())
}

/// Query del kanban personal: responsable + rango sobre `created_at`
pub fn kanban_query(assignee: &str, created: &TimeBounds) -> Query {
    base_query()
        .eq("atribuido_para", assignee)
        .within("created_at", created)
        .order("created_at", false)
}

/// "Por Usuário": solo EM_ANDAMENTO
pub fn in_progress_query(person: Option<&str>, created: &TimeBounds) -> Query {
    let query = base_query()
        .statuses(&[DemandaStatus::EmAndamento])
        .within("created_at", created);
    let query = match person {
        Some(id) => query.eq("atribuido_para", id),
        None => query,
    };
    query.order("created_at", false)
}

/// Cronograma y su reporte: rango sobre `updated_at`
pub fn cronograma_query(person: Option<&str>, statuses: &[DemandaStatus], updated: &TimeBounds, ascending: bool) -> Query {
    let query = base_query()
        .within("updated_at", updated)
        .statuses(statuses);
    let query = match person {
        Some(id) => query.eq("atribuido_para", id),
        None => query,
    };
    query.order("updated_at", ascending)
}

/// "Meu Painel": demandas propias por `created_at`
pub fn dashboard_query(owner: &str, created: &TimeBounds) -> Query {
    base_query()
        .eq("atribuido_para", owner)
        .within("created_at", created)
        .order("updated_at", false)
}

pub fn dashboard_report_query(owner: &str, created: &TimeBounds) -> Query {
    base_query()
        .eq("atribuido_para", owner)
        .within("created_at", created)
        .order("created_at", true)
}

pub fn approval_queue_query() -> Query {
    base_query()
        .statuses(&[DemandaStatus::ParaAprovacao])
        .order("updated_at", true)
}

pub fn all_query() -> Query {
    base_query().order("created_at", false)
}

pub async fn fetch(client: &SupabaseClient, query: &Query) -> ApiResult<Vec<Demanda>> {
    let demandas: Vec<Demanda> = client.select(TABLE_DEMANDAS, query).await?;
    log::debug!("📦 [DEMANDAS] {} filas recibidas", demandas.len());
    Ok(demandas)
}

pub async fn insert(client: &SupabaseClient, row: &NewDemanda) -> ApiResult<Demanda> {
    let demanda: Demanda = client.insert(TABLE_DEMANDAS, row, &Query::new().select("*")).await?;
    log::info!("✅ [DEMANDAS] Demanda creada: {}", demanda.id);
    Ok(demanda)
}

pub async fn update(client: &SupabaseClient, id: &str, patch: &DemandaPatch) -> ApiResult<()> {
    client.update(TABLE_DEMANDAS, &Query::new().eq("id", id), patch).await?;
    log::info!("💾 [DEMANDAS] Demanda {} actualizada", id);
    Ok(())
}

pub async fn delete(client: &SupabaseClient, id: &str) -> ApiResult<()> {
    client.delete(TABLE_DEMANDAS, &Query::new().eq("id", id)).await?;
    log::info!("🗑️ [DEMANDAS] Demanda {} eliminada", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(query: &Query) -> Vec<String> {
        query.pairs().map(|(k, v)| format!("{}={}", k, v)).collect()
    }

    #[test]
    fn test_kanban_query_is_personal() {
        let q = kanban_query("me", &TimeBounds::default());
        let pairs = keys(&q);
        assert!(pairs[0].starts_with("select=*,criador:profiles!demandas_criado_por_fkey"));
        assert!(pairs.contains(&"atribuido_para=eq.me".to_string()));
        assert_eq!(pairs.last().unwrap(), "order=created_at.desc");
    }

    #[test]
    fn test_cronograma_report_is_ascending_by_update() {
        let bounds = TimeBounds { gte: Some("a".into()), lte: Some("b".into()) };
        let q = cronograma_query(
            Some("u1"),
            &[DemandaStatus::Aprovado, DemandaStatus::EmAndamento],
            &bounds,
            true,
        );
        let pairs = keys(&q);
        assert!(pairs.contains(&"updated_at=gte.a".to_string()));
        assert!(pairs.contains(&"status=in.(APROVADO,EM_ANDAMENTO)".to_string()));
        assert!(pairs.contains(&"atribuido_para=eq.u1".to_string()));
        assert_eq!(pairs.last().unwrap(), "order=updated_at.asc");
    }

    #[test]
    fn test_in_progress_without_person() {
        let pairs = keys(&in_progress_query(None, &TimeBounds::default()));
        assert!(pairs.contains(&"status=eq.EM_ANDAMENTO".to_string()));
        assert!(!pairs.iter().any(|p| p.starts_with("atribuido_para")));
    }
}
