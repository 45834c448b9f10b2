// ============================================================================
// SUPABASE CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// REST (PostgREST), cabeceras de auth y mapeo de errores. Sin lógica de negocio.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CONFIG;
use crate::error::{ApiError, ApiResult};
use crate::services::query::Query;

const ACCEPT_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Cliente Supabase - apikey + token del usuario (si hay sesión)
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new() -> Self {
        Self::with_config(&CONFIG.supabase_url, &CONFIG.supabase_anon_key)
    }

    pub fn with_config(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: None,
        }
    }

    /// Copia del cliente autenticado con el token de la sesión
    pub fn with_token(&self, access_token: Option<String>) -> Self {
        Self { access_token, ..self.clone() }
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Bearer: token de usuario o, sin sesión, la anon key
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or(&self.anon_key))
    }

    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer())
    }

    /// Error tipado a partir de una respuesta no-2xx
    pub async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::from_response(status, &body)
    }

    pub async fn ok(response: Response) -> ApiResult<Response> {
        if response.ok() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// GET de varias filas
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &Query) -> ApiResult<Vec<T>> {
        let response = self
            .authorize(Request::get(&self.rest_url(table)).query(query.pairs()))
            .send()
            .await?;
        let response = Self::ok(response).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    /// GET de una fila (`.single()`); sin filas devuelve `ApiError::NotFound`
    pub async fn select_single<T: DeserializeOwned>(&self, table: &str, query: &Query) -> ApiResult<T> {
        let response = self
            .authorize(Request::get(&self.rest_url(table)).query(query.pairs()))
            .header("Accept", ACCEPT_OBJECT)
            .send()
            .await?;
        let response = Self::ok(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST de una fila devolviendo la representación insertada
    pub async fn insert<B, T>(&self, table: &str, row: &B, query: &Query) -> ApiResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(Request::post(&self.rest_url(table)).query(query.pairs()))
            .header("Prefer", "return=representation")
            .header("Accept", ACCEPT_OBJECT)
            .json(row)?;
        let response = Self::ok(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Upsert por `on_conflict`
    pub async fn upsert<B: Serialize>(&self, table: &str, row: &B, on_conflict: &str) -> ApiResult<()> {
        let query = Query::new().on_conflict(on_conflict);
        let request = self
            .authorize(Request::post(&self.rest_url(table)).query(query.pairs()))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)?;
        Self::ok(request.send().await?).await?;
        Ok(())
    }

    /// PATCH con filtros
    pub async fn update<B: Serialize>(&self, table: &str, filter: &Query, patch: &B) -> ApiResult<()> {
        let request = self
            .authorize(Request::patch(&self.rest_url(table)).query(filter.pairs()))
            .header("Prefer", "return=minimal")
            .json(patch)?;
        Self::ok(request.send().await?).await?;
        Ok(())
    }

    pub async fn delete(&self, table: &str, filter: &Query) -> ApiResult<()> {
        if filter.is_empty() {
            // Nunca borrar una tabla entera
            return Err(ApiError::Validation("DELETE sem filtro".to_string()));
        }
        let response = self
            .authorize(Request::delete(&self.rest_url(table)).query(filter.pairs()))
            .send()
            .await?;
        Self::ok(response).await?;
        Ok(())
    }
}

impl Default for SupabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_and_bearer() {
        let client = SupabaseClient::with_config("https://abc.supabase.co/", "anon");
        assert_eq!(client.rest_url("demandas"), "https://abc.supabase.co/rest/v1/demandas");
        assert_eq!(client.auth_url("/token"), "https://abc.supabase.co/auth/v1/token");
        assert_eq!(client.storage_url("object/b/p"), "https://abc.supabase.co/storage/v1/object/b/p");
        assert_eq!(client.bearer(), "Bearer anon");
        let authed = client.with_token(Some("jwt".into()));
        assert_eq!(authed.bearer(), "Bearer jwt");
    }
}
