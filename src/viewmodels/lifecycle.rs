// ============================================================================
// LIFECYCLE VIEWMODEL - Transiciones de estado de una demanda
// ============================================================================
// Cualquier estado puede pasar a cualquier otro. Pasar a EM_ANDAMENTO
// reasigna la demanda a quien actúa en el MISMO patch.
// ============================================================================

use chrono::{DateTime, Utc};
use crate::models::{DemandaPatch, DemandaStatus};

/// Patch para mover una demanda a `target` (drag & drop, select de estado)
pub fn transition_patch(target: DemandaStatus, acting_profile_id: &str, now: DateTime<Utc>) -> DemandaPatch {
    let patch = DemandaPatch::new(now).with_status(target);
    if target == DemandaStatus::EmAndamento {
        patch.with_assignee(Some(acting_profile_id.to_string()))
    } else {
        patch
    }
}

/// Patch del botón "Iniciar": {status: EM_ANDAMENTO, atribuido_para, updated_at}
pub fn start_patch(acting_profile_id: &str, now: DateTime<Utc>) -> DemandaPatch {
    transition_patch(DemandaStatus::EmAndamento, acting_profile_id, now)
}

/// Patch de delegación
pub fn delegate_patch(assignee_id: &str, now: DateTime<Utc>) -> DemandaPatch {
    DemandaPatch::new(now).with_assignee(Some(assignee_id.to_string()))
}

/// Validar la delegación antes de enviar
pub fn validate_delegation(selected: Option<&str>, acting_profile_id: &str) -> Result<String, &'static str> {
    match selected.map(str::trim) {
        Some(id) if !id.is_empty() && id != acting_profile_id => Ok(id.to_string()),
        _ => Err("Selecione um usuário para delegar a demanda."),
    }
}

/// Texto del diálogo de confirmación de inicio
pub fn start_confirmation_text(titulo: &str) -> String {
    format!("Deseja iniciar a demanda \"{}\"?", titulo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_start_is_one_combined_write() {
        let patch = start_patch("me", now());
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["status"], "EM_ANDAMENTO");
        assert_eq!(obj["atribuido_para"], "me");
        assert!(obj.contains_key("updated_at"));
    }

    #[test]
    fn test_drop_on_in_progress_reassigns() {
        let patch = transition_patch(DemandaStatus::EmAndamento, "me", now());
        assert_eq!(patch.atribuido_para, Some(Some("me".to_string())));
    }

    #[test]
    fn test_other_transitions_keep_assignee() {
        for target in DemandaStatus::ALL.into_iter().filter(|s| *s != DemandaStatus::EmAndamento) {
            let patch = transition_patch(target, "me", now());
            assert_eq!(patch.status, Some(target));
            assert_eq!(patch.atribuido_para, None);
            let json = serde_json::to_value(&patch).unwrap();
            assert!(!json.as_object().unwrap().contains_key("atribuido_para"));
        }
    }

    #[test]
    fn test_transitions_out_of_approved_are_allowed() {
        let patch = transition_patch(DemandaStatus::AFazer, "me", now());
        assert_eq!(patch.status, Some(DemandaStatus::AFazer));
    }

    #[test]
    fn test_delegation_requires_another_user() {
        assert_eq!(validate_delegation(Some("u2"), "me"), Ok("u2".to_string()));
        assert!(validate_delegation(Some(""), "me").is_err());
        assert!(validate_delegation(None, "me").is_err());
        assert!(validate_delegation(Some("me"), "me").is_err());
        let json = serde_json::to_value(delegate_patch("u2", now())).unwrap();
        assert_eq!(json["atribuido_para"], "u2");
        assert!(json.get("status").is_none());
    }
}
