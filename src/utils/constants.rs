/// Claves de localStorage
pub const THEME_STORAGE_KEY: &str = "theme";
pub const SESSION_STORAGE_KEY: &str = "demandas.auth.session";

/// Tablas, joins y buckets del backend
pub const TABLE_DEMANDAS: &str = "demandas";
pub const TABLE_PROFILES: &str = "profiles";

pub const JOIN_CRIADOR: &str = "criador:profiles!demandas_criado_por_fkey(id,nome,email,cargo)";
pub const JOIN_ATRIBUIDO: &str = "atribuido:profiles!demandas_atribuido_para_fkey(id,nome,email,cargo)";

/// Nombre del sistema en reportes y cabecera
pub const APP_NAME: &str = "MSA Demandas";

/// Espera antes de reabrir un canal realtime cerrado por el servidor
pub const REALTIME_RECONNECT_MS: u32 = 5_000;

/// Longitud mínima de contraseña al crear usuarios
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MESES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];
