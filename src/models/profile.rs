// ============================================================================
// PROFILE - Perfil del usuario (tabla `profiles`) + jerarquía de cargos
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};

/// Cargo (rol) en la jerarquía
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Cargo {
    #[serde(rename = "ADM")]
    Adm,
    #[serde(rename = "DIRETOR")]
    Diretor,
    #[serde(rename = "GERENTE")]
    Gerente,
    #[serde(rename = "COORDENADOR")]
    Coordenador,
    #[serde(rename = "COLABORADOR")]
    Colaborador,
    #[serde(rename = "DESIGN")]
    Design,
    #[serde(rename = "AUDIOVISUAL")]
    Audiovisual,
    #[serde(rename = "SOLICITANTE")]
    Solicitante,
}

impl Cargo {
    /// Orden de presentación en los selects
    pub const ALL: [Cargo; 8] = [
        Cargo::Adm,
        Cargo::Diretor,
        Cargo::Gerente,
        Cargo::Coordenador,
        Cargo::Colaborador,
        Cargo::Design,
        Cargo::Audiovisual,
        Cargo::Solicitante,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cargo::Adm => "ADM",
            Cargo::Diretor => "DIRETOR",
            Cargo::Gerente => "GERENTE",
            Cargo::Coordenador => "COORDENADOR",
            Cargo::Colaborador => "COLABORADOR",
            Cargo::Design => "DESIGN",
            Cargo::Audiovisual => "AUDIOVISUAL",
            Cargo::Solicitante => "SOLICITANTE",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cargo::Adm => "ADM",
            Cargo::Diretor => "Diretor",
            Cargo::Gerente => "Gerente",
            Cargo::Coordenador => "Coordenador",
            Cargo::Colaborador => "Colaborador",
            Cargo::Design => "Design",
            Cargo::Audiovisual => "Audio Visual",
            Cargo::Solicitante => "Solicitante",
        }
    }

    /// Solicitante: crea demandas pero no las ejecuta
    pub fn is_requester_only(&self) -> bool {
        matches!(self, Cargo::Solicitante)
    }
}

impl Default for Cargo {
    fn default() -> Self {
        Cargo::Colaborador
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_cargo")]
    pub cargo: Option<Cargo>,
}

/// Tag desconocido → None: la fila se carga igual y no pasa ningún predicado de permisos
fn lenient_cargo<'de, D>(deserializer: D) -> Result<Option<Cargo>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    let cargo = tag.as_deref().and_then(Cargo::from_tag);
    if let (Some(tag), None) = (&tag, cargo) {
        log::warn!("⚠️ [PROFILE] Cargo desconhecido '{}', tratado como sem cargo", tag);
    }
    Ok(cargo)
}

impl Profile {
    /// Nombre para mostrar (nombre, email o id)
    pub fn display_name(&self) -> String {
        self.nome
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    /// Primer nombre (etiquetas de gráficos)
    pub fn first_name(&self) -> String {
        self.display_name()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn cargo_label(&self) -> &'static str {
        self.cargo.map(|c| c.label()).unwrap_or("-")
    }

    pub fn is_requester_only(&self) -> bool {
        self.cargo.map(|c| c.is_requester_only()).unwrap_or(false)
    }
}

/// Fila para upsert de perfil (registro y alta de empleados)
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct ProfileUpsert {
    pub id: String,
    pub email: String,
    pub nome: String,
    pub cargo: Cargo,
}

impl ProfileUpsert {
    /// Perfil por defecto: nombre = parte local del email, cargo COLABORADOR
    pub fn default_for(id: &str, email: &str) -> Self {
        let nome = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: id.to_string(),
            email: email.to_string(),
            nome,
            cargo: Cargo::Colaborador,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_only() {
        assert!(Cargo::Solicitante.is_requester_only());
        assert!(!Cargo::Audiovisual.is_requester_only());
    }

    #[test]
    fn test_profile_names() {
        let p: Profile = serde_json::from_str(
            r#"{"id":"u1","nome":"Maria Clara Lima","email":"maria@msa.com","cargo":"AUDIOVISUAL"}"#,
        )
        .unwrap();
        assert_eq!(p.first_name(), "Maria");
        assert_eq!(p.cargo_label(), "Audio Visual");

        let anon = Profile { id: "u2".into(), nome: None, email: Some("x@y.z".into()), cargo: None };
        assert_eq!(anon.display_name(), "x@y.z");
        assert_eq!(anon.cargo_label(), "-");
    }

    #[test]
    fn test_unknown_cargo_does_not_break_the_list() {
        let users: Vec<Profile> = serde_json::from_str(
            r#"[
                {"id":"u1","nome":"Ana","email":"ana@msa.com","cargo":"GERENTE"},
                {"id":"u2","nome":"Beto","email":"beto@msa.com","cargo":"ESTAGIARIO"},
                {"id":"u3","nome":"Caio","email":"caio@msa.com","cargo":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].cargo, Some(Cargo::Gerente));
        assert_eq!(users[1].cargo, None);
        assert_eq!(users[1].cargo_label(), "-");
        assert!(!users[1].is_requester_only());
        assert_eq!(users[2].cargo, None);
    }

    #[test]
    fn test_default_profile_from_email() {
        let p = ProfileUpsert::default_for("u1", "joao.silva@msa.com");
        assert_eq!(p.nome, "joao.silva");
        assert_eq!(p.cargo, Cargo::Colaborador);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["cargo"], "COLABORADOR");
    }
}
