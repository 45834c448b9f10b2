// ============================================================================
// FUNCIONÁRIOS VIEWMODEL - Alta, cambio de cargo y baja de perfiles
// ============================================================================

use crate::models::{Cargo, ProfileUpsert};
use crate::services::{auth_service, profile_service};
use crate::state::{AppEvent, AppState};
use crate::utils::constants::MIN_PASSWORD_LEN;
use crate::viewmodels::permissions::can_create_users;

pub const MSG_REQUIRED_FIELDS: &str = "Por favor, preencha todos os campos obrigatórios.";
pub const MSG_SHORT_PASSWORD: &str = "A senha deve ter pelo menos 6 caracteres.";
pub const MSG_NO_CREATE_PERMISSION: &str = "Você não tem permissão para criar novos usuários.";
pub const MSG_NO_DELETE_PERMISSION: &str = "Você não tem permissão para excluir usuários.";

/// Formulario "Novo Funcionário" (whatsapp y departamento son opcionales)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NovoFuncionarioForm {
    pub nome: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub senha: String,
    pub cargo: Option<Cargo>,
    pub departamento: Option<String>,
}

impl NovoFuncionarioForm {
    pub fn validate(&self) -> Result<Cargo, &'static str> {
        let cargo = match self.cargo {
            Some(c) if !self.nome.trim().is_empty() && !self.email.trim().is_empty() && !self.senha.is_empty() => c,
            _ => return Err(MSG_REQUIRED_FIELDS),
        };
        if self.senha.chars().count() < MIN_PASSWORD_LEN {
            return Err(MSG_SHORT_PASSWORD);
        }
        Ok(cargo)
    }
}

/// Mensaje de éxito del alta
pub fn created_message(nome: &str, email: &str, cargo: Cargo) -> String {
    format!(
        "Usuário \"{}\" criado com sucesso!\n\nEmail: {}\nCargo: {}",
        nome,
        email,
        cargo.label()
    )
}

pub fn delete_confirmation_text(nome: &str) -> String {
    format!("Tem certeza que deseja excluir o usuário \"{}\"?\n\nEsta ação não pode ser desfeita!", nome)
}

pub struct FuncionariosViewModel {
    state: AppState,
}

impl FuncionariosViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    /// Alta vía registro; la sesión devuelta NO sustituye a la del gestor
    pub async fn create(&self, form: NovoFuncionarioForm) -> Result<String, String> {
        if !can_create_users(self.state.auth.cargo()) {
            return Err(MSG_NO_CREATE_PERMISSION.to_string());
        }
        let cargo = form.validate().map_err(str::to_string)?;
        let nome = form.nome.trim().to_string();
        let email = form.email.trim().to_string();

        let client = self.state.auth.client();
        let created = auth_service::sign_up(&client, &nome, &email, &form.senha)
            .await
            .map_err(|e| {
                log::error!("❌ [FUNCIONARIOS] Erro no cadastro: {}", e);
                format!("Erro ao criar usuário: {}", e)
            })?;

        let row = ProfileUpsert {
            id: created.user().id.clone(),
            email: email.clone(),
            nome: nome.clone(),
            cargo,
        };
        profile_service::upsert(&client, &row).await.map_err(|e| {
            log::error!("❌ [FUNCIONARIOS] Erro ao salvar perfil: {}", e);
            format!("Erro ao criar usuário: {}", e)
        })?;

        log::info!("✅ [FUNCIONARIOS] Usuário {} criado ({})", row.id, cargo.as_str());
        self.reload_users().await;
        Ok(created_message(&nome, &email, cargo))
    }

    pub async fn update_cargo(&self, id: &str, cargo: Cargo) -> Result<(), String> {
        profile_service::update_cargo(&self.state.auth.client(), id, cargo)
            .await
            .map_err(|e| {
                log::error!("❌ [FUNCIONARIOS] Erro ao atualizar cargo: {}", e);
                format!("Erro ao atualizar cargo: {}", e)
            })?;
        log::info!("✅ [FUNCIONARIOS] {} agora é {}", id, cargo.as_str());
        self.reload_users().await;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), String> {
        if !can_create_users(self.state.auth.cargo()) {
            return Err(MSG_NO_DELETE_PERMISSION.to_string());
        }
        profile_service::delete(&self.state.auth.client(), id)
            .await
            .map_err(|e| {
                log::error!("❌ [FUNCIONARIOS] Erro ao excluir: {}", e);
                format!("Erro ao excluir usuário: {}", e)
            })?;
        log::info!("🗑️ [FUNCIONARIOS] Usuário {} excluído", id);
        self.reload_users().await;
        Ok(())
    }

    async fn reload_users(&self) {
        match profile_service::fetch_all(&self.state.auth.client()).await {
            Ok(users) => {
                self.state.auth.set_users(users);
                self.state.events.publish(AppEvent::UsersChanged);
            }
            Err(e) => log::error!("❌ [FUNCIONARIOS] Erro ao recarregar usuários: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NovoFuncionarioForm {
        NovoFuncionarioForm {
            nome: "Bruno".into(),
            email: "bruno@msa.com".into(),
            senha: "segredo".into(),
            cargo: Some(Cargo::Design),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(form().validate(), Ok(Cargo::Design));
        let mut missing = form();
        missing.cargo = None;
        assert_eq!(missing.validate(), Err(MSG_REQUIRED_FIELDS));
        let mut blank = form();
        blank.nome = "  ".into();
        assert_eq!(blank.validate(), Err(MSG_REQUIRED_FIELDS));
    }

    #[test]
    fn test_password_length() {
        let mut f = form();
        f.senha = "12345".into();
        assert_eq!(f.validate(), Err(MSG_SHORT_PASSWORD));
        f.senha = "123456".into();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            created_message("Bruno", "bruno@msa.com", Cargo::Audiovisual),
            "Usuário \"Bruno\" criado com sucesso!\n\nEmail: bruno@msa.com\nCargo: Audio Visual"
        );
        assert!(delete_confirmation_text("Ana").starts_with("Tem certeza que deseja excluir o usuário \"Ana\"?"));
    }
}
