// ============================================================================
// SESSION VIEWMODEL - Login, registro, perfil y logout
// ============================================================================
// Escribe el resultado en AuthState y publica los eventos; las vistas
// solo muestran el error que devuelve cada flujo
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::auth::SignUpResponse;
use crate::models::{AuthSession, Cargo, Profile, ProfileUpsert};
use crate::services::{auth_service, profile_service, SupabaseClient};
use crate::state::{AppEvent, AppState};

/// ViewModel de sesión
pub struct SessionViewModel {
    state: AppState,
}

impl SessionViewModel {
    pub fn new(state: &AppState) -> Self {
        Self { state: state.clone() }
    }

    /// Login con email + contraseña
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), String> {
        let client = SupabaseClient::new();
        let session = auth_service::sign_in_with_password(&client, email, password)
            .await
            .map_err(|e| {
                log::error!("❌ [AUTH] Login: {}", e);
                e.to_string()
            })?;
        auth_service::persist_session(&session);
        self.open_session(session).await;
        Ok(())
    }

    /// Registro + perfil COLABORADOR (un fallo del perfil solo avisa)
    pub async fn sign_up(&self, nome: &str, email: &str, password: &str) -> Result<(), String> {
        let client = SupabaseClient::new();
        let response = auth_service::sign_up(&client, nome, email, password)
            .await
            .map_err(|e| {
                log::error!("❌ [AUTH] Registro: {}", e);
                e.to_string()
            })?;

        let session = match response {
            SignUpResponse::Session(token) => AuthSession::from_token(token, chrono::Utc::now().timestamp()),
            SignUpResponse::User(user) => {
                log::info!("📧 [AUTH] Usuario {} pendiente de confirmación", user.id);
                return Err("Cadastro realizado! Confirme seu e-mail antes de entrar.".to_string());
            }
        };
        auth_service::persist_session(&session);

        let row = ProfileUpsert {
            id: session.user.id.clone(),
            email: email.to_string(),
            nome: nome.to_string(),
            cargo: Cargo::Colaborador,
        };
        let authed = client.with_token(Some(session.access_token.clone()));
        if let Err(e) = profile_service::upsert(&authed, &row).await {
            log::warn!("⚠️ [AUTH] Perfil no creado tras el registro: {}", e);
        }

        self.open_session(session).await;
        Ok(())
    }

    /// Recuperar la sesión guardada al arrancar
    pub async fn restore(&self) {
        match auth_service::restore_session(&SupabaseClient::new()).await {
            Some(session) => self.open_session(session).await,
            None => {
                log::info!("🔓 [AUTH] Sin sesión guardada");
                self.state.auth.set_restoring(false);
                self.state.notify_subscribers();
            }
        }
    }

    /// Revocar, limpiar y volver al login
    pub async fn sign_out(&self) {
        let client = self.state.auth.client();
        if let Err(e) = auth_service::sign_out(&client).await {
            log::warn!("⚠️ [AUTH] Logout en el servidor: {}", e);
        }
        auth_service::clear_persisted_session();
        self.state.reset_session();
        self.state.events.publish(AppEvent::SessionEnded);
        self.state.notify_subscribers();
    }

    async fn open_session(&self, session: AuthSession) {
        self.state.auth.set_session(Some(session));
        self.state.auth.set_error(None);

        let client = self.state.auth.client();
        match self.load_profile(&client).await {
            Ok(profile) => {
                log::info!("👤 [AUTH] Perfil {} ({})", profile.display_name(), profile.cargo_label());
                self.state.auth.set_profile(Some(profile));
            }
            Err(e) => log::error!("❌ [AUTH] Error cargando perfil: {}", e),
        }
        self.load_users().await;

        self.state.auth.set_restoring(false);
        self.state.notify_subscribers();
        self.state.events.publish(AppEvent::ProfileLoaded);
    }

    /// Perfil propio; si no existe se crea con el nombre del email
    async fn load_profile(&self, client: &SupabaseClient) -> ApiResult<Profile> {
        let user = self
            .state
            .auth
            .get_session()
            .map(|s| s.user)
            .ok_or(ApiError::Unauthorized)?;

        match profile_service::fetch_profile(client, &user.id).await {
            Err(ApiError::NotFound) => {
                log::info!("🆕 [AUTH] Creando perfil para {}", user.id);
                let email = user.email.clone().unwrap_or_default();
                profile_service::upsert(client, &ProfileUpsert::default_for(&user.id, &email)).await?;
                profile_service::fetch_profile(client, &user.id).await
            }
            other => other,
        }
    }

    /// Lista de perfiles para selects y columnas
    pub async fn load_users(&self) {
        match profile_service::fetch_all(&self.state.auth.client()).await {
            Ok(users) => {
                log::info!("✅ [AUTH] {} usuarios cargados", users.len());
                self.state.auth.set_users(users);
                self.state.events.publish(AppEvent::UsersChanged);
            }
            Err(e) => log::error!("❌ [AUTH] Error cargando usuarios: {}", e),
        }
    }
}
