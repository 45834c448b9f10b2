// ============================================================================
// PERMISSIONS VIEWMODEL - Visibilidad según cargo
// ============================================================================
// Solo conveniencia de UI: el backend aplica las reglas reales (RLS).
// ============================================================================

use crate::models::{Cargo, Profile};

/// ADM, DIRETOR, GERENTE
pub fn can_manage_demands(cargo: Option<Cargo>) -> bool {
    matches!(cargo, Some(Cargo::Adm | Cargo::Diretor | Cargo::Gerente))
}

/// ADM, DIRETOR
pub fn can_manage_employees(cargo: Option<Cargo>) -> bool {
    matches!(cargo, Some(Cargo::Adm | Cargo::Diretor))
}

/// ADM, DIRETOR, GERENTE (alta y baja de empleados)
pub fn can_create_users(cargo: Option<Cargo>) -> bool {
    matches!(cargo, Some(Cargo::Adm | Cargo::Diretor | Cargo::Gerente))
}

/// Qué controles ve el perfil actual
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RoleVisibility {
    pub filters_panel: bool,
    pub approval_deck: bool,
    pub reports: bool,
    pub user_tasks: bool,
    pub cronograma: bool,
    pub employees: bool,
}

impl RoleVisibility {
    pub fn for_cargo(cargo: Option<Cargo>) -> Self {
        let manager = can_manage_demands(cargo);
        Self {
            filters_panel: manager,
            approval_deck: manager,
            reports: manager,
            user_tasks: manager,
            cronograma: manager,
            employees: can_manage_employees(cargo),
        }
    }

    pub fn for_profile(profile: Option<&Profile>) -> Self {
        Self::for_cargo(profile.and_then(|p| p.cargo))
    }
}

/// "Olá, {nome}! (Perfil: {cargo})"
pub fn greeting(profile: &Profile) -> String {
    let label = profile
        .cargo
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("Olá, {}! (Perfil: {})", profile.display_name(), label.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_sees_no_manager_controls() {
        let v = RoleVisibility::for_cargo(Some(Cargo::Solicitante));
        assert!(!v.filters_panel);
        assert!(!v.employees);
        assert_eq!(v, RoleVisibility::default());
    }

    #[test]
    fn test_manager_and_director_sets() {
        let gerente = RoleVisibility::for_cargo(Some(Cargo::Gerente));
        assert!(gerente.filters_panel && gerente.user_tasks && gerente.cronograma);
        assert!(!gerente.employees);

        let diretor = RoleVisibility::for_cargo(Some(Cargo::Diretor));
        assert!(diretor.filters_panel && diretor.employees);

        for cargo in [Cargo::Coordenador, Cargo::Colaborador, Cargo::Design, Cargo::Audiovisual] {
            assert!(!can_manage_demands(Some(cargo)));
            assert!(!can_create_users(Some(cargo)));
        }
        assert!(can_create_users(Some(Cargo::Gerente)));
        assert!(!can_manage_employees(Some(Cargo::Gerente)));
        assert!(!can_manage_demands(None));
    }

    #[test]
    fn test_unknown_cargo_grants_nothing() {
        let p: Profile =
            serde_json::from_str(r#"{"id":"u9","nome":"Duda","cargo":"ESTAGIARIO"}"#).unwrap();
        let v = RoleVisibility::for_profile(Some(&p));
        assert_eq!(v, RoleVisibility::default());
        assert!(!can_manage_demands(p.cargo));
        assert!(!can_manage_employees(p.cargo));
        assert!(!can_create_users(p.cargo));
        assert_eq!(greeting(&p), "Olá, Duda! (Perfil: -)");
    }

    #[test]
    fn test_greeting_lowercases_label() {
        let p = Profile {
            id: "u1".into(),
            nome: Some("Carla".into()),
            email: None,
            cargo: Some(Cargo::Audiovisual),
        };
        assert_eq!(greeting(&p), "Olá, Carla! (Perfil: audio visual)");
    }
}
