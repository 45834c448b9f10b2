use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub environment: String,
    pub log_level: String,
    pub storage_config: StorageConfig,
    pub timer_config: TimerConfig,
    pub demanda_config: DemandaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            storage_config: StorageConfig::default(),
            timer_config: TimerConfig::default(),
            demanda_config: DemandaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub cache_control_seconds: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "demandas-anexos".to_string(),
            cache_control_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    pub countdown_tick_ms: u32,
    pub heartbeat_interval_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            countdown_tick_ms: 1000,
            heartbeat_interval_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandaConfig {
    pub default_estimated_hours: f64,
    pub default_deadline_days: i64,
    pub dashboard_recent_limit: usize,
    pub realtime_channel: String,
}

impl Default for DemandaConfig {
    fn default() -> Self {
        Self {
            default_estimated_hours: 8.0,
            default_deadline_days: 7,
            dashboard_recent_limit: 10,
            realtime_channel: "user-tasks-channel".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .unwrap_or(defaults.supabase_url.as_str())
                .trim_end_matches('/')
                .to_string(),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY")
                .unwrap_or("").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            storage_config: StorageConfig {
                bucket: option_env!("STORAGE_BUCKET")
                    .unwrap_or("demandas-anexos").to_string(),
                cache_control_seconds: option_env!("STORAGE_CACHE_CONTROL")
                    .unwrap_or("3600").parse().unwrap_or(3600),
            },
            timer_config: TimerConfig {
                countdown_tick_ms: option_env!("COUNTDOWN_TICK_MS")
                    .unwrap_or("1000").parse().unwrap_or(1000),
                heartbeat_interval_ms: option_env!("HEARTBEAT_INTERVAL_MS")
                    .unwrap_or("30000").parse().unwrap_or(30_000),
            },
            demanda_config: DemandaConfig {
                default_estimated_hours: option_env!("DEFAULT_ESTIMATED_HOURS")
                    .unwrap_or("8").parse().unwrap_or(8.0),
                default_deadline_days: option_env!("DEFAULT_DEADLINE_DAYS")
                    .unwrap_or("7").parse().unwrap_or(7),
                dashboard_recent_limit: option_env!("DASHBOARD_RECENT_LIMIT")
                    .unwrap_or("10").parse().unwrap_or(10),
                realtime_channel: option_env!("REALTIME_CHANNEL")
                    .unwrap_or("user-tasks-channel").to_string(),
            },
        }
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }

    /// URL del WebSocket de realtime (http -> ws, https -> wss)
    pub fn realtime_url(&self) -> String {
        let ws_base = if let Some(rest) = self.supabase_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.supabase_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.supabase_url.clone()
        };
        format!("{}/realtime/v1/websocket?apikey={}&vsn=1.0.0", ws_base, self.supabase_anon_key)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_url_switches_scheme() {
        let mut config = AppConfig::default();
        config.supabase_url = "https://abc.supabase.co".to_string();
        config.supabase_anon_key = "key".to_string();
        assert_eq!(
            config.realtime_url(),
            "wss://abc.supabase.co/realtime/v1/websocket?apikey=key&vsn=1.0.0"
        );
        config.supabase_url = "http://localhost:54321".to_string();
        assert!(config.realtime_url().starts_with("ws://localhost:54321/realtime"));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_config.bucket, "demandas-anexos");
        assert_eq!(config.timer_config.countdown_tick_ms, 1000);
        assert_eq!(config.demanda_config.default_estimated_hours, 8.0);
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
