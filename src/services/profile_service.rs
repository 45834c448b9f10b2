// ============================================================================
// PROFILE SERVICE - Tabla `profiles`
// ============================================================================

use serde::Serialize;

use crate::error::ApiResult;
use crate::models::{Cargo, Profile, ProfileUpsert};
use crate::services::query::Query;
use crate::services::supabase_client::SupabaseClient;
use crate::utils::constants::TABLE_PROFILES;

#[derive(Serialize)]
struct CargoPatch {
    cargo: Cargo,
}

pub async fn fetch_profile(client: &SupabaseClient, id: &str) -> ApiResult<Profile> {
    let query = Query::new().select("*").eq("id", id);
    client.select_single(TABLE_PROFILES, &query).await
}

/// Todos los perfiles ordenados por nombre
pub async fn fetch_all(client: &SupabaseClient) -> ApiResult<Vec<Profile>> {
    let query = Query::new().select("*").order("nome", true);
    let users: Vec<Profile> = client.select(TABLE_PROFILES, &query).await?;
    log::info!("👥 [PROFILES] {} usuarios cargados", users.len());
    Ok(users)
}

pub async fn upsert(client: &SupabaseClient, row: &ProfileUpsert) -> ApiResult<()> {
    client.upsert(TABLE_PROFILES, &[row], "id").await
}

pub async fn update_cargo(client: &SupabaseClient, id: &str, cargo: Cargo) -> ApiResult<()> {
    let filter = Query::new().eq("id", id);
    client.update(TABLE_PROFILES, &filter, &CargoPatch { cargo }).await
}

/// Borra solo la fila de perfil; la cuenta de auth queda
pub async fn delete(client: &SupabaseClient, id: &str) -> ApiResult<()> {
    client.delete(TABLE_PROFILES, &Query::new().eq("id", id)).await
}
