// ============================================================================
// STORAGE SERVICE - Adjuntos en el bucket de Supabase Storage
// ============================================================================

use gloo_net::http::Request;
use web_sys::File;

use crate::config::CONFIG;
use crate::error::{ApiError, ApiResult};
use crate::services::supabase_client::SupabaseClient;

/// Ruta `anexos/{usuario}/{millis}-{aleatorio}.{ext}`
pub fn object_path(user_id: &str, file_name: &str, millis: i64, random: &str) -> String {
    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(file_name);
    format!("anexos/{}/{}-{}.{}", user_id, millis, random, ext)
}

pub fn public_url(client: &SupabaseClient, path: &str) -> String {
    client.storage_url(&format!("object/public/{}/{}", CONFIG.storage_config.bucket, path))
}

/// Subir el archivo y devolver su URL pública
pub async fn upload(client: &SupabaseClient, user_id: &str, file: File) -> ApiResult<String> {
    let random: String = uuid::Uuid::new_v4().simple().to_string().chars().take(6).collect();
    let path = object_path(user_id, &file.name(), chrono::Utc::now().timestamp_millis(), &random);
    let url = client.storage_url(&format!("object/{}/{}", CONFIG.storage_config.bucket, path));
    let content_type = file.type_();

    log::info!("📎 [STORAGE] Subiendo {} ({} bytes)", path, file.size());

    let mut builder = client
        .authorize(Request::post(&url))
        .header("cache-control", &format!("max-age={}", CONFIG.storage_config.cache_control_seconds))
        .header("x-upsert", "false");
    if !content_type.is_empty() {
        builder = builder.header("Content-Type", &content_type);
    }

    let response = builder
        .body(file)
        .map_err(|e| ApiError::Storage(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    if !response.ok() {
        let err = SupabaseClient::error_from(response).await;
        return Err(ApiError::Storage(err.to_string()));
    }

    Ok(public_url(client, &path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_keeps_extension() {
        assert_eq!(
            object_path("u1", "briefing.final.pdf", 1714531200000, "k3x9ab"),
            "anexos/u1/1714531200000-k3x9ab.pdf"
        );
    }

    #[test]
    fn test_public_url() {
        let client = SupabaseClient::with_config("https://abc.supabase.co", "anon");
        assert_eq!(
            public_url(&client, "anexos/u1/1-a.png"),
            "https://abc.supabase.co/storage/v1/object/public/demandas-anexos/anexos/u1/1-a.png"
        );
    }
}
