// ============================================================================
// DEMANDA VIEWMODEL - Escrituras sobre demandas y carga del kanban
// ============================================================================
// Cada escritura devuelve el mensaje de error listo para el alert; tras un
// éxito la vista llama a `after_write` (cierra modal, recarga, avisa)
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use web_sys::File;

use crate::config::CONFIG;
use crate::models::{Demanda, DemandaEdit, DemandaStatus, KanbanFilters, NewDemanda};
use crate::services::{demanda_service, storage_service, Query};
use crate::state::{ActiveView, AppEvent, AppState};
use crate::utils::today;
use crate::viewmodels::lifecycle::{delegate_patch, start_patch, transition_patch, validate_delegation};
use crate::viewmodels::loaders::fetch_into;

pub const MSG_ASSIGNEE_REQUIRED: &str = "Por favor, selecione um usuário para atribuir a demanda.";
pub const MSG_TITLE_REQUIRED: &str = "Por favor, informe o título da demanda.";

/// Datos del formulario "Nova Demanda"
#[derive(Clone, PartialEq, Debug)]
pub struct NovaDemandaForm {
    pub titulo: String,
    pub descricao: Option<String>,
    pub atribuido_para: Option<String>,
    pub status: DemandaStatus,
    pub data_previsao: Option<DateTime<Utc>>,
    pub horas_estimadas: Option<f64>,
}

impl NovaDemandaForm {
    /// Validación previa a cualquier petición
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.titulo.trim().is_empty() {
            return Err(MSG_TITLE_REQUIRED);
        }
        match self.atribuido_para.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(()),
            _ => Err(MSG_ASSIGNEE_REQUIRED),
        }
    }

    pub fn into_new(self, criado_por: &str, arquivo_url: Option<String>) -> Result<NewDemanda, &'static str> {
        self.validate()?;
        let horas = self
            .horas_estimadas
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(CONFIG.demanda_config.default_estimated_hours);
        Ok(NewDemanda {
            titulo: self.titulo.trim().to_string(),
            descricao: self.descricao.filter(|d| !d.trim().is_empty()),
            criado_por: criado_por.to_string(),
            atribuido_para: self.atribuido_para,
            status: self.status,
            data_previsao: self.data_previsao,
            horas_estimadas: horas,
            arquivo_url,
        })
    }
}

/// Consulta del kanban: el asignado es siempre quien actúa
pub fn kanban_request(acting: &str, filters: &KanbanFilters, today: NaiveDate) -> Query {
    let bounds = filters.date.resolve(today).bounds();
    demanda_service::kanban_query(acting, &bounds)
}

/// ViewModel de demandas (el "Task Store")
pub struct DemandaViewModel {
    state: AppState,
}

impl DemandaViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    fn acting(&self) -> Result<String, String> {
        self.state
            .auth
            .acting_id()
            .ok_or_else(|| "Sessão expirada, faça login novamente".to_string())
    }

    /// Kanban personal: siempre las demandas asignadas a quien actúa, también para gestores
    pub async fn load_kanban(&self) {
        let Some(acting) = self.state.auth.acting_id() else { return };
        let query = kanban_request(&acting, &self.state.kanban.get_filters(), today());
        fetch_into(&self.state, &self.state.kanban.list, ActiveView::Kanban, query).await;
    }

    /// Cerrar el modal, recargar el kanban y avisar a las demás vistas
    pub async fn after_write(&self) {
        self.state.close_modal();
        self.load_kanban().await;
        self.state.events.publish(AppEvent::DemandasChanged);
    }

    /// Alta; el adjunto se sube antes y, si falla, la demanda se crea sin él
    pub async fn create(&self, form: NovaDemandaForm, arquivo: Option<File>) -> Result<Demanda, String> {
        form.validate().map_err(str::to_string)?;
        let acting = self.acting()?;

        let mut arquivo_url = None;
        if let Some(file) = arquivo {
            let client = self.state.auth.client();
            let owner = self.state.auth.user_id().unwrap_or_else(|| acting.clone());
            match storage_service::upload(&client, &owner, file).await {
                Ok(url) => arquivo_url = Some(url),
                Err(e) => log::error!("❌ [DEMANDAS] Upload falhou, criando sem anexo: {}", e),
            }
        }

        let row = form.into_new(&acting, arquivo_url).map_err(str::to_string)?;
        let created = demanda_service::insert(&self.state.auth.client(), &row)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao criar: {}", e);
                format!("Erro ao criar demanda: {}", e)
            })?;
        log::info!("✅ [DEMANDAS] Demanda {} criada", created.id);
        Ok(created)
    }

    /// Cambio de estado (drag & drop o select del modal)
    pub async fn update_status(&self, id: &str, status: DemandaStatus) -> Result<(), String> {
        let acting = self.acting()?;
        let patch = transition_patch(status, &acting, Utc::now());
        demanda_service::update(&self.state.auth.client(), id, &patch)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao atualizar status: {}", e);
                format!("Erro ao atualizar status: {}", e)
            })?;
        log::info!("🔀 [DEMANDAS] {} → {}", id, status.as_str());
        Ok(())
    }

    /// "Iniciar": EM_ANDAMENTO y asignada a quien actúa, en un solo patch
    pub async fn start(&self, id: &str) -> Result<(), String> {
        let acting = self.acting()?;
        let patch = start_patch(&acting, Utc::now());
        demanda_service::update(&self.state.auth.client(), id, &patch)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao iniciar: {}", e);
                format!("Erro ao iniciar demanda: {}", e)
            })?;
        log::info!("▶️ [DEMANDAS] {} iniciada por {}", id, acting);
        Ok(())
    }

    pub async fn delegate(&self, id: &str, selected: Option<&str>) -> Result<(), String> {
        let acting = self.acting()?;
        let assignee = validate_delegation(selected, &acting).map_err(str::to_string)?;
        let patch = delegate_patch(&assignee, Utc::now());
        demanda_service::update(&self.state.auth.client(), id, &patch)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao delegar: {}", e);
                format!("Erro ao delegar demanda: {}", e)
            })?;
        log::info!("🤝 [DEMANDAS] {} delegada para {}", id, assignee);
        Ok(())
    }

    pub async fn edit(&self, id: &str, fields: DemandaEdit) -> Result<(), String> {
        if fields.titulo.trim().is_empty() {
            return Err(MSG_TITLE_REQUIRED.to_string());
        }
        let patch = fields.into_patch(Utc::now());
        demanda_service::update(&self.state.auth.client(), id, &patch)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao editar: {}", e);
                format!("Erro ao atualizar demanda: {}", e)
            })?;
        log::info!("✏️ [DEMANDAS] {} editada", id);
        Ok(())
    }

    pub async fn duplicate(&self, original: &Demanda) -> Result<Demanda, String> {
        let acting = self.acting()?;
        let row = NewDemanda::duplicate_of(original, &acting);
        let copy = demanda_service::insert(&self.state.auth.client(), &row)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao duplicar: {}", e);
                format!("Erro ao duplicar demanda: {}", e)
            })?;
        log::info!("📑 [DEMANDAS] {} duplicada como {}", original.id, copy.id);
        Ok(copy)
    }

    pub async fn delete(&self, id: &str) -> Result<(), String> {
        demanda_service::delete(&self.state.auth.client(), id)
            .await
            .map_err(|e| {
                log::error!("❌ [DEMANDAS] Erro ao excluir: {}", e);
                format!("Erro ao excluir demanda: {}", e)
            })?;
        log::info!("🗑️ [DEMANDAS] {} excluída", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateFilter, DateFilterMode};

    fn form(atribuido: Option<&str>) -> NovaDemandaForm {
        NovaDemandaForm {
            titulo: "  Banner da campanha ".to_string(),
            descricao: Some("   ".to_string()),
            atribuido_para: atribuido.map(str::to_string),
            status: DemandaStatus::AFazer,
            data_previsao: None,
            horas_estimadas: None,
        }
    }

    #[test]
    fn test_kanban_is_scoped_to_acting_user() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let filters = KanbanFilters { date: DateFilter::new(DateFilterMode::Hoje) };
        let pairs: Vec<String> = kanban_request("gerente-1", &filters, day)
            .pairs()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let assignee: Vec<&String> = pairs.iter().filter(|p| p.starts_with("atribuido_para=")).collect();
        assert_eq!(assignee, vec!["atribuido_para=eq.gerente-1"]);
        assert!(pairs.iter().any(|p| p == "created_at=gte.2024-05-15T00:00:00"));
        assert!(pairs.iter().any(|p| p == "created_at=lte.2024-05-15T23:59:59"));
    }

    #[test]
    fn test_assignee_is_required() {
        assert_eq!(form(None).validate(), Err(MSG_ASSIGNEE_REQUIRED));
        assert_eq!(form(Some("  ")).validate(), Err(MSG_ASSIGNEE_REQUIRED));
        assert!(form(Some("u1")).validate().is_ok());
    }

    #[test]
    fn test_title_is_required() {
        let mut f = form(Some("u1"));
        f.titulo = " ".to_string();
        assert_eq!(f.validate(), Err(MSG_TITLE_REQUIRED));
    }

    #[test]
    fn test_into_new_defaults_hours_and_trims() {
        let row = form(Some("u1")).into_new("creator", None).unwrap();
        assert_eq!(row.titulo, "Banner da campanha");
        assert_eq!(row.descricao, None);
        assert_eq!(row.horas_estimadas, 8.0);
        assert_eq!(row.criado_por, "creator");
        assert_eq!(row.status, DemandaStatus::AFazer);

        let mut f = form(Some("u1"));
        f.horas_estimadas = Some(2.5);
        let row = f.into_new("creator", Some("https://x/anexo.png".into())).unwrap();
        assert_eq!(row.horas_estimadas, 2.5);
        assert_eq!(row.arquivo_url.as_deref(), Some("https://x/anexo.png"));
    }
}
