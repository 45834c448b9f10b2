// Servicios: SOLO comunicación con Supabase (REST, auth, storage, realtime)
// y generación de reportes

pub mod supabase_client;
pub mod query;
pub mod auth_service;
pub mod profile_service;
pub mod demanda_service;
pub mod storage_service;
pub mod realtime_service;
pub mod report_service;

pub use supabase_client::SupabaseClient;
pub use query::Query;
pub use realtime_service::RealtimeChannel;
pub use report_service::ReportDocument;
