// ============================================================================
// LOADERS - Cargas de cada vista con tickets de petición
// ============================================================================
// Cada carga pide un ticket a su FencedList; una respuesta vieja o de una
// vista ya desmontada se descarta sin tocar el estado
// ============================================================================

use chrono::{Local, NaiveDate};

use crate::models::{CronogramaFilters, DashboardFilters, Profile, TimeBounds};
use crate::services::demanda_service;
use crate::services::Query;
use crate::state::{ActiveView, AppState, FencedList, IncrementalUpdate};
use crate::utils::today;

/// Ejecutar `query` y, si el ticket sigue vigente, guardar y repintar `view`
pub(crate) async fn fetch_into(state: &AppState, list: &FencedList, view: ActiveView, query: Query) {
    let ticket = list.begin();
    let client = state.auth.client();

    match demanda_service::fetch(&client, &query).await {
        Ok(items) => {
            let count = items.len();
            if list.commit(ticket, items) {
                log::info!("✅ [{}] {} demandas carregadas", view.as_str().to_uppercase(), count);
                refresh_if_active(state, view);
            }
        }
        Err(e) => {
            if list.fail(ticket) {
                log::error!("❌ [{}] Erro ao carregar demandas: {}", view.as_str().to_uppercase(), e);
                refresh_if_active(state, view);
            }
        }
    }
}

fn refresh_if_active(state: &AppState, view: ActiveView) {
    if state.get_active_view() == view {
        state.notify(IncrementalUpdate::Content);
    }
}

/// "Por Usuário": EM_ANDAMENTO por created_at
pub async fn load_user_tasks(state: &AppState) {
    let filters = state.views.user_tasks.get_filters();
    let bounds = filters.date.resolve(today()).bounds();
    let query = demanda_service::in_progress_query(filters.usuario.as_deref(), &bounds);
    fetch_into(state, &state.views.user_tasks.list, ActiveView::UserTasks, query).await;
}

/// Filtros iniciales del cronograma: mes actual y primera persona asignable
pub fn cronograma_defaults(assignable: &[Profile], today: NaiveDate) -> CronogramaFilters {
    let mut filters = CronogramaFilters::for_today(today);
    filters.usuario = assignable.first().map(|u| u.id.clone());
    filters
}

/// Cronograma: una persona, un mes local, por updated_at
pub async fn load_cronograma(state: &AppState) {
    let filters = match state.views.cronograma.get_filters() {
        Some(f) => f,
        None => {
            let f = cronograma_defaults(&state.auth.assignable_users(), today());
            state.views.cronograma.set_filters(f.clone());
            f
        }
    };

    let Some(person) = filters.usuario.clone() else {
        log::warn!("⚠️ [CRONOGRAMA] Nenhum usuário disponível");
        let ticket = state.views.cronograma.list.begin();
        state.views.cronograma.list.commit(ticket, Vec::new());
        refresh_if_active(state, ActiveView::Cronograma);
        return;
    };

    let Some(bounds) = TimeBounds::local_month(filters.year, filters.month, &Local) else {
        log::warn!("⚠️ [CRONOGRAMA] Mês inválido: {}/{}", filters.month, filters.year);
        return;
    };
    let query = demanda_service::cronograma_query(Some(&person), &filters.status.statuses(), &bounds, false);
    fetch_into(state, &state.views.cronograma.list, ActiveView::Cronograma, query).await;
}

/// "Meu Painel": demandas propias por created_at
pub async fn load_dashboard(state: &AppState) {
    let Some(owner) = state.auth.acting_id() else { return };
    let filters = match state.views.dashboard.get_filters() {
        Some(f) => f,
        None => {
            let f = DashboardFilters::for_today(today());
            state.views.dashboard.set_filters(f.clone());
            f
        }
    };
    let Some(bounds) = filters.created_bounds(&Local) else {
        log::warn!("⚠️ [DASHBOARD] Período inválido");
        return;
    };
    let query = demanda_service::dashboard_query(&owner, &bounds);
    fetch_into(state, &state.views.dashboard.list, ActiveView::Dashboard, query).await;
}

/// BI: todas las demandas (el filtro por usuario es local)
pub async fn load_bi(state: &AppState) {
    let query = demanda_service::all_query();
    fetch_into(state, &state.views.bi.list, ActiveView::Bi, query).await;
}

/// Deck de aprovação: PARA_APROVACAO, la más antigua primero
pub async fn load_approval(state: &AppState) {
    let query = demanda_service::approval_queue_query();
    fetch_into(state, &state.views.approval.list, ActiveView::ApprovalDeck, query).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cargo;
    use crate::viewmodels::aggregation::fixtures::profile;

    #[test]
    fn test_cronograma_defaults_pick_first_assignable() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let users = vec![
            profile("c1", "Carla", Cargo::Colaborador),
            profile("d1", "Diego", Cargo::Design),
        ];
        let filters = cronograma_defaults(&users, day);
        assert_eq!(filters.usuario.as_deref(), Some("c1"));
        assert_eq!((filters.month, filters.year), (5, 2024));
    }

    #[test]
    fn test_cronograma_defaults_without_users() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(cronograma_defaults(&[], day).usuario, None);
    }
}
