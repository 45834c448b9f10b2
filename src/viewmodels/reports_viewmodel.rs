// ============================================================================
// REPORTS VIEWMODEL - Datos y documento de los reportes imprimibles
// ============================================================================

use chrono::{Local, NaiveDate, Utc};

use crate::models::{DateRange, DemandaStatus};
use crate::services::{demanda_service, report_service, ReportDocument};
use crate::state::AppState;

pub const MSG_RANGE_REQUIRED: &str = "Por favor, selecione a data de início e fim.";
pub const MSG_RANGE_INVERTED: &str = "A data de início deve ser anterior à data de fim.";
pub const MSG_DAY_REQUIRED: &str = "Por favor, selecione uma data para o relatório.";
pub const MSG_EMPTY_RANGE: &str = "Nenhuma demanda encontrada para o período selecionado.";
pub const MSG_EMPTY_DAY: &str = "Nenhuma demanda encontrada para a data selecionada.";

/// Rango del reporte de entregas (inicio <= fin)
pub fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(NaiveDate, NaiveDate), &'static str> {
    let (Some(s), Some(e)) = (start, end) else {
        return Err(MSG_RANGE_REQUIRED);
    };
    if (DateRange { start, end }).is_inverted() {
        return Err(MSG_RANGE_INVERTED);
    }
    Ok((s, e))
}

pub struct ReportsViewModel {
    state: AppState,
}

impl ReportsViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    /// "Relatório de Entregas" de la persona elegida en el cronograma
    pub async fn entregas(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<ReportDocument, String> {
        let (start, end) = validate_range(start, end).map_err(str::to_string)?;
        let person = self.state.views.cronograma.get_filters().and_then(|f| f.usuario);
        let colaborador = person
            .as_deref()
            .and_then(|id| self.state.auth.find_user(id))
            .map(|p| p.display_name())
            .unwrap_or_else(|| "Todos".to_string());

        let bounds = DateRange { start: Some(start), end: Some(end) }.bounds();
        let query = demanda_service::cronograma_query(
            person.as_deref(),
            &[DemandaStatus::Aprovado, DemandaStatus::EmAndamento],
            &bounds,
            true,
        );
        let demandas = demanda_service::fetch(&self.state.auth.client(), &query)
            .await
            .map_err(|e| {
                log::error!("❌ [REPORTS] Erro ao gerar relatório de entregas: {}", e);
                format!("Erro ao gerar PDF: {}", e)
            })?;
        if demandas.is_empty() {
            return Err(MSG_EMPTY_RANGE.to_string());
        }

        log::info!("🖨️ [REPORTS] Entregas: {} demandas ({} a {})", demandas.len(), start, end);
        Ok(report_service::entregas_report(
            &demandas,
            start,
            end,
            &colaborador,
            Utc::now(),
            &Local,
        ))
    }

    /// "Relatório de Demandas" de un día de "Meu Painel"
    pub async fn demandas_do_dia(&self, day: Option<NaiveDate>) -> Result<ReportDocument, String> {
        let day = day.ok_or_else(|| MSG_DAY_REQUIRED.to_string())?;
        let profile = self
            .state
            .auth
            .get_profile()
            .ok_or_else(|| "Sessão expirada, faça login novamente".to_string())?;

        let query = demanda_service::dashboard_report_query(&profile.id, &DateRange::day(day).bounds());
        let demandas = demanda_service::fetch(&self.state.auth.client(), &query)
            .await
            .map_err(|e| {
                log::error!("❌ [REPORTS] Erro ao gerar relatório diário: {}", e);
                format!("Erro ao gerar PDF: {}", e)
            })?;
        if demandas.is_empty() {
            return Err(MSG_EMPTY_DAY.to_string());
        }

        log::info!("🖨️ [REPORTS] Painel: {} demandas em {}", demandas.len(), day);
        Ok(report_service::demandas_report(
            &demandas,
            day,
            &profile.display_name(),
            Utc::now(),
            &Local,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, d)
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(validate_range(None, date(3)), Err(MSG_RANGE_REQUIRED));
        assert_eq!(validate_range(date(3), None), Err(MSG_RANGE_REQUIRED));
        assert_eq!(validate_range(date(9), date(3)), Err(MSG_RANGE_INVERTED));
        assert_eq!(validate_range(date(3), date(3)), Ok((date(3).unwrap(), date(3).unwrap())));
    }
}
