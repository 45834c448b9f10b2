// ============================================================================
// LOCAL STORAGE - Tema y sesión persistidos en el navegador
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

use crate::error::{ApiError, ApiResult};

fn local_storage() -> ApiResult<Storage> {
    window()
        .ok_or_else(|| ApiError::Browser("window indisponível".to_string()))?
        .local_storage()?
        .ok_or_else(|| ApiError::Browser("localStorage indisponível".to_string()))
}

/// JSON guardado; si está corrupto se ignora (y se avisa)
fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor inválido em '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> ApiResult<()> {
    let json = serde_json::to_string(value)?;
    local_storage()?.set_item(key, &json)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_string(key)?;
    decode(key, &raw)
}

pub fn remove(key: &str) -> ApiResult<()> {
    local_storage()?.remove_item(key)?;
    Ok(())
}

/// Valor plano (sin JSON), p.ej. `theme = "light"`
pub fn load_string(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok()?
}

pub fn save_string(key: &str, value: &str) -> ApiResult<()> {
    local_storage()?.set_item(key, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthSession;
    use crate::utils::SESSION_STORAGE_KEY;

    #[test]
    fn test_decode_stored_session() {
        let raw = r#"{"access_token":"a","refresh_token":"r","expires_at":1700000000,"user":{"id":"u1","email":"ana@msa.com"}}"#;
        let session: Option<AuthSession> = decode(SESSION_STORAGE_KEY, raw);
        assert_eq!(session.map(|s| s.user.id), Some("u1".to_string()));
    }

    #[test]
    fn test_corrupt_value_is_ignored() {
        assert_eq!(decode::<AuthSession>(SESSION_STORAGE_KEY, "{not json"), None);
        assert_eq!(decode::<u32>("n", "\"texto\""), None);
    }
}
