// ============================================================================
// DEMANDA - Tarea del tablero (tabla `demandas`)
// ============================================================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::models::profile::Profile;
use crate::models::timestamp;

/// Horas estimadas cuando la fila no las trae
pub const DEFAULT_HORAS_ESTIMADAS: f64 = 8.0;

/// Estados del ciclo de vida de una demanda
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum DemandaStatus {
    #[serde(rename = "A_FAZER")]
    AFazer,
    #[serde(rename = "FIXO")]
    Fixo,
    #[serde(rename = "EM_ANDAMENTO")]
    EmAndamento,
    #[serde(rename = "PARA_APROVACAO")]
    ParaAprovacao,
    #[serde(rename = "EM_REVISAO")]
    EmRevisao,
    #[serde(rename = "APROVADO")]
    Aprovado,
}

impl DemandaStatus {
    /// Orden de las columnas del kanban
    pub const ALL: [DemandaStatus; 6] = [
        DemandaStatus::AFazer,
        DemandaStatus::Fixo,
        DemandaStatus::EmAndamento,
        DemandaStatus::ParaAprovacao,
        DemandaStatus::EmRevisao,
        DemandaStatus::Aprovado,
    ];

    /// Tag tal como viaja en la API
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandaStatus::AFazer => "A_FAZER",
            DemandaStatus::Fixo => "FIXO",
            DemandaStatus::EmAndamento => "EM_ANDAMENTO",
            DemandaStatus::ParaAprovacao => "PARA_APROVACAO",
            DemandaStatus::EmRevisao => "EM_REVISAO",
            DemandaStatus::Aprovado => "APROVADO",
        }
    }

    /// Parsear tag (atributo `data-status`, valor de un `<select>`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandaStatus::AFazer => "A Fazer",
            DemandaStatus::Fixo => "Fixo",
            DemandaStatus::EmAndamento => "Em Andamento",
            DemandaStatus::ParaAprovacao => "Para Aprovação",
            DemandaStatus::EmRevisao => "Em Revisão",
            DemandaStatus::Aprovado => "Aprovado",
        }
    }

    /// Sufijo CSS (`status-a-fazer`, `status-em-andamento`, ...)
    pub fn css_suffix(&self) -> String {
        self.as_str().to_lowercase().replace('_', "-")
    }

    /// A_FAZER y FIXO cuentan como pendientes
    pub fn is_pending(&self) -> bool {
        matches!(self, DemandaStatus::AFazer | DemandaStatus::Fixo)
    }

    /// APROVADO es terminal en la UI
    pub fn is_done(&self) -> bool {
        matches!(self, DemandaStatus::Aprovado)
    }

    /// Solo las pendientes muestran el botón "Iniciar"
    pub fn can_start(&self) -> bool {
        self.is_pending()
    }
}

impl Default for DemandaStatus {
    fn default() -> Self {
        DemandaStatus::AFazer
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Demanda {
    pub id: String,
    pub titulo: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub criado_por: Option<String>,
    #[serde(default)]
    pub atribuido_para: Option<String>,
    pub status: DemandaStatus,
    #[serde(default)]
    pub horas_estimadas: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub data_previsao: Option<DateTime<Utc>>,
    #[serde(default)]
    pub arquivo_url: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    // Joins de PostgREST (criador:profiles!..., atribuido:profiles!...)
    #[serde(default, skip_serializing)]
    pub criador: Option<Profile>,
    #[serde(default, skip_serializing)]
    pub atribuido: Option<Profile>,
}

impl Demanda {
    /// Código visible: TSK-YYYYMMDD + primeros 8 caracteres del id
    pub fn task_code<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let created = self.created_at.with_timezone(tz);
        let short_id: String = self.id.chars().take(8).collect();
        format!("TSK-{}{}", created.format("%Y%m%d"), short_id.to_uppercase())
    }

    /// Previsión vencida y todavía no aprobada (marca `text-danger` y KPI "Atrasadas")
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_done() && self.data_previsao.map(|p| p < now).unwrap_or(false)
    }

    pub fn horas(&self) -> f64 {
        match self.horas_estimadas {
            Some(h) if h > 0.0 => h,
            _ => DEFAULT_HORAS_ESTIMADAS,
        }
    }

    /// Horas formateadas sin decimales superfluos ("8h", "2.5h")
    pub fn horas_label(&self) -> String {
        let h = self.horas();
        if h.fract() == 0.0 {
            format!("{}h", h as i64)
        } else {
            format!("{}h", h)
        }
    }

    pub fn criador_nome(&self) -> String {
        self.criador
            .as_ref()
            .and_then(|p| p.nome.clone())
            .unwrap_or_else(|| "Desconhecido".to_string())
    }

    pub fn atribuido_nome(&self) -> String {
        self.atribuido
            .as_ref()
            .map(|p| p.display_name())
            .unwrap_or_else(|| "Não atribuído".to_string())
    }

    /// Nombre del archivo adjunto (último segmento de la URL)
    pub fn arquivo_nome(&self) -> Option<String> {
        let url = self.arquivo_url.as_deref()?;
        let name = url.rsplit('/').next().unwrap_or(url);
        Some(name.split('?').next().unwrap_or(name).to_string())
    }

    /// El adjunto es una imagen previsualizable
    pub fn arquivo_is_image(&self) -> bool {
        const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];
        self.arquivo_nome()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// Payload de inserción
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct NewDemanda {
    pub titulo: String,
    pub descricao: Option<String>,
    pub criado_por: String,
    pub atribuido_para: Option<String>,
    pub status: DemandaStatus,
    pub data_previsao: Option<DateTime<Utc>>,
    pub horas_estimadas: f64,
    pub arquivo_url: Option<String>,
}

impl NewDemanda {
    /// Copia de una demanda existente: sin asignar, A_FAZER y sin adjunto
    pub fn duplicate_of(original: &Demanda, criado_por: &str) -> Self {
        Self {
            titulo: format!("{} (Cópia)", original.titulo),
            descricao: original.descricao.clone(),
            criado_por: criado_por.to_string(),
            atribuido_para: None,
            status: DemandaStatus::AFazer,
            data_previsao: original.data_previsao,
            horas_estimadas: original.horas(),
            arquivo_url: None,
        }
    }
}

/// Patch parcial para PATCH /demandas?id=eq.X
/// `Some(None)` se serializa como `null` (borrar el campo)
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct DemandaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DemandaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atribuido_para: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_previsao: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horas_estimadas: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl DemandaPatch {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            titulo: None,
            descricao: None,
            status: None,
            atribuido_para: None,
            data_previsao: None,
            horas_estimadas: None,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: DemandaStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_assignee(mut self, profile_id: Option<String>) -> Self {
        self.atribuido_para = Some(profile_id);
        self
    }
}

/// Campos editables desde el modal de edición
#[derive(Clone, PartialEq, Debug)]
pub struct DemandaEdit {
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_previsao: Option<DateTime<Utc>>,
    pub horas_estimadas: f64,
}

impl DemandaEdit {
    pub fn into_patch(self, now: DateTime<Utc>) -> DemandaPatch {
        DemandaPatch {
            titulo: Some(self.titulo),
            descricao: Some(self.descricao),
            data_previsao: Some(self.data_previsao),
            horas_estimadas: Some(self.horas_estimadas),
            ..DemandaPatch::new(now)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample_json() -> &'static str {
        r#"{
            "id": "3f2a9c41-aaaa-bbbb-cccc-1234567890ab",
            "titulo": "Arte para campanha",
            "descricao": null,
            "criado_por": "u1",
            "atribuido_para": "u2",
            "status": "EM_ANDAMENTO",
            "horas_estimadas": 4,
            "data_previsao": "2024-05-10T18:00:00+00:00",
            "arquivo_url": "https://x.supabase.co/storage/v1/object/public/demandas-anexos/anexos/u1/1715-ab12.PNG",
            "created_at": "2024-05-01T02:30:00.123456",
            "updated_at": "2024-05-02T10:00:00+00:00",
            "criador": {"id": "u1", "nome": "Ana Souza", "email": "ana@msa.com", "cargo": "GERENTE"},
            "atribuido": null
        }"#
    }

    #[test]
    fn test_deserialize_row_with_joins() {
        let d: Demanda = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(d.status, DemandaStatus::EmAndamento);
        assert_eq!(d.horas(), 4.0);
        assert_eq!(d.horas_label(), "4h");
        assert_eq!(d.criador_nome(), "Ana Souza");
        assert_eq!(d.atribuido_nome(), "Não atribuído");
        assert!(d.arquivo_is_image());
        assert_eq!(d.arquivo_nome().as_deref(), Some("1715-ab12.PNG"));
    }

    #[test]
    fn test_join_with_unknown_cargo_still_parses() {
        let raw = sample_json().replace(r#""cargo": "GERENTE""#, r#""cargo": "ESTAGIARIO""#);
        let rows: Vec<Demanda> = serde_json::from_str(&format!("[{}]", raw)).unwrap();
        assert_eq!(rows.len(), 1);
        let criador = rows[0].criador.as_ref().unwrap();
        assert_eq!(criador.nome.as_deref(), Some("Ana Souza"));
        assert_eq!(criador.cargo, None);
    }

    #[test]
    fn test_overdue_flag() {
        let mut d: Demanda = serde_json::from_str(sample_json()).unwrap();
        let deadline = d.data_previsao.unwrap();
        d.status = DemandaStatus::AFazer;
        assert!(d.is_overdue(deadline + chrono::Duration::hours(1)));
        assert!(!d.is_overdue(deadline - chrono::Duration::hours(1)));

        d.status = DemandaStatus::Aprovado;
        assert!(!d.is_overdue(deadline + chrono::Duration::hours(1)));

        d.status = DemandaStatus::AFazer;
        d.data_previsao = None;
        assert!(!d.is_overdue(deadline + chrono::Duration::hours(1)));
    }

    #[test]
    fn test_task_code_uses_local_creation_date() {
        let d: Demanda = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(d.task_code(&Utc), "TSK-202405013F2A9C41");
        // 02:30 UTC es todavía 30/04 en UTC-3
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(d.task_code(&brt), "TSK-202404303F2A9C41");
    }

    #[test]
    fn test_status_tags_and_labels() {
        for status in DemandaStatus::ALL {
            assert_eq!(DemandaStatus::from_tag(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(DemandaStatus::from_tag("NA_FILA"), None);
        assert_eq!(DemandaStatus::ParaAprovacao.css_suffix(), "para-aprovacao");
        assert_eq!(DemandaStatus::EmRevisao.label(), "Em Revisão");
    }

    #[test]
    fn test_patch_skips_untouched_fields() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
        let patch = DemandaPatch::new(now).with_status(DemandaStatus::EmRevisao);
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["status"], "EM_REVISAO");
        assert!(obj.contains_key("updated_at"));
    }

    #[test]
    fn test_edit_patch_clears_description_with_null() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
        let edit = DemandaEdit {
            titulo: "Novo título".to_string(),
            descricao: None,
            data_previsao: None,
            horas_estimadas: 8.0,
        };
        let value = serde_json::to_value(edit.into_patch(now)).unwrap();
        assert!(value["descricao"].is_null());
        assert!(value.as_object().unwrap().contains_key("descricao"));
        assert!(!value.as_object().unwrap().contains_key("status"));
    }

    #[test]
    fn test_duplicate_resets_assignee_status_and_file() {
        let d: Demanda = serde_json::from_str(sample_json()).unwrap();
        let copy = NewDemanda::duplicate_of(&d, "u9");
        assert_eq!(copy.titulo, "Arte para campanha (Cópia)");
        assert_eq!(copy.atribuido_para, None);
        assert_eq!(copy.status, DemandaStatus::AFazer);
        assert_eq!(copy.arquivo_url, None);
        assert_eq!(copy.criado_por, "u9");
        assert_eq!(copy.data_previsao, d.data_previsao);
    }
}
