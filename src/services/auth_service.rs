// ============================================================================
// AUTH SERVICE - GoTrue (login, registro, refresh, logout) + sesión persistida
// ============================================================================

use gloo_net::http::Request;

use crate::error::{ApiError, ApiResult};
use crate::models::auth::{PasswordGrant, RefreshGrant, SignUpMetadata, SignUpRequest, SignUpResponse, TokenResponse};
use crate::models::{AuthSession, AuthUser};
use crate::services::supabase_client::SupabaseClient;
use crate::utils::constants::SESSION_STORAGE_KEY;
use crate::utils::storage;

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

async fn token_request<B: serde::Serialize>(client: &SupabaseClient, grant_type: &str, body: &B) -> ApiResult<AuthSession> {
    let url = client.auth_url("token");
    let request = client
        .authorize(Request::post(&url).query([("grant_type", grant_type)]))
        .json(body)?;
    let response = SupabaseClient::ok(request.send().await?).await?;
    let token = response.json::<TokenResponse>().await?;
    Ok(AuthSession::from_token(token, now_secs()))
}

/// Login con email + contraseña
pub async fn sign_in_with_password(client: &SupabaseClient, email: &str, password: &str) -> ApiResult<AuthSession> {
    log::info!("🔐 [AUTH] Iniciando sesión: {}", email);
    let grant = PasswordGrant {
        email: email.to_string(),
        password: password.to_string(),
    };
    let session = token_request(client, "password", &grant).await?;
    log::info!("✅ [AUTH] Sesión iniciada para {}", session.user.id);
    Ok(session)
}

pub async fn refresh_session(client: &SupabaseClient, refresh_token: &str) -> ApiResult<AuthSession> {
    log::info!("🔄 [AUTH] Renovando sesión...");
    let grant = RefreshGrant { refresh_token: refresh_token.to_string() };
    token_request(client, "refresh_token", &grant).await
}

/// Registro; si el proyecto exige confirmación por email no hay sesión
pub async fn sign_up(client: &SupabaseClient, nome: &str, email: &str, password: &str) -> ApiResult<SignUpResponse> {
    log::info!("📝 [AUTH] Registrando usuario: {}", email);
    let body = SignUpRequest {
        email: email.to_string(),
        password: password.to_string(),
        data: SignUpMetadata { nome: nome.to_string() },
    };
    let request = client
        .authorize(Request::post(&client.auth_url("signup")))
        .json(&body)?;
    let response = SupabaseClient::ok(request.send().await?).await?;
    let parsed = response.json::<SignUpResponse>().await?;
    if parsed.user().id.is_empty() {
        return Err(ApiError::Validation(
            "Erro ao criar usuário. Verifique se o email já está cadastrado.".to_string(),
        ));
    }
    Ok(parsed)
}

/// Usuario del token actual (valida una sesión restaurada)
pub async fn get_user(client: &SupabaseClient) -> ApiResult<AuthUser> {
    let response = client
        .authorize(Request::get(&client.auth_url("user")))
        .send()
        .await?;
    let response = SupabaseClient::ok(response).await?;
    Ok(response.json::<AuthUser>().await?)
}

/// Revocar el token en el servidor
pub async fn sign_out(client: &SupabaseClient) -> ApiResult<()> {
    let response = client
        .authorize(Request::post(&client.auth_url("logout")))
        .send()
        .await?;
    SupabaseClient::ok(response).await?;
    log::info!("👋 [AUTH] Sesión cerrada en el servidor");
    Ok(())
}

// ----------------------------------------------------------------------------
// Persistencia local
// ----------------------------------------------------------------------------

pub fn persist_session(session: &AuthSession) {
    if let Err(e) = storage::save_json(SESSION_STORAGE_KEY, session) {
        log::warn!("⚠️ [AUTH] No se pudo guardar la sesión: {}", e);
    }
}

pub fn load_persisted_session() -> Option<AuthSession> {
    storage::load_json::<AuthSession>(SESSION_STORAGE_KEY)
}

pub fn clear_persisted_session() {
    if let Err(e) = storage::remove(SESSION_STORAGE_KEY) {
        log::warn!("⚠️ [AUTH] No se pudo borrar la sesión: {}", e);
    }
}

/// Sesión guardada, renovada una vez si expiró
pub async fn restore_session(client: &SupabaseClient) -> Option<AuthSession> {
    let stored = load_persisted_session()?;
    if !stored.is_expired(now_secs()) {
        // Solo un 401 obliga a renovar; sin red se sigue con el token guardado
        match get_user(&client.with_token(Some(stored.access_token.clone()))).await {
            Err(ApiError::Unauthorized | ApiError::Http { status: 401 | 403, .. }) => {
                log::warn!("⚠️ [AUTH] Token guardado rechazado, renovando...");
            }
            _ => {
                log::info!("📦 [AUTH] Sesión restaurada de localStorage");
                return Some(stored);
            }
        }
    }

    match refresh_session(client, &stored.refresh_token).await {
        Ok(fresh) => {
            persist_session(&fresh);
            Some(fresh)
        }
        Err(e) => {
            log::warn!("⚠️ [AUTH] Sesión expirada y no renovable: {}", e);
            clear_persisted_session();
            None
        }
    }
}
