use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub api_prefix: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub request_timeout_seconds: u32,
    pub token_ttl_hours: i64,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            request_timeout_seconds: 30,
            token_ttl_hours: 24,
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub toast_duration_ms: u32,
    pub login_redirect_delay_ms: u32,
    pub signup_redirect_delay_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            login_redirect_delay_ms: 800,
            signup_redirect_delay_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            api_prefix: option_env!("API_PREFIX")
                .map(|s| s.to_string())
                .unwrap_or(defaults.api_prefix),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            request_timeout_seconds: option_env!("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(30),
            token_ttl_hours: option_env!("TOKEN_TTL_HOURS")
                .unwrap_or("24").parse().unwrap_or(24),
            ui_config: UIConfig {
                toast_duration_ms: option_env!("TOAST_DURATION_MS")
                    .unwrap_or("3000").parse().unwrap_or(3000),
                login_redirect_delay_ms: option_env!("LOGIN_REDIRECT_DELAY_MS")
                    .unwrap_or("800").parse().unwrap_or(800),
                signup_redirect_delay_ms: option_env!("SIGNUP_REDIRECT_DELAY_MS")
                    .unwrap_or("1500").parse().unwrap_or(1500),
            },
        }
    }

    /// URL completa de un endpoint del API (`/ocr/scan` -> `http://host/api/v1/ocr/scan`)
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.backend_url, self.api_prefix, path)
    }

    /// Duración de vida del token persistido
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours.max(1))
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
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
    fn api_url_joins_base_prefix_and_path() {
        let config = AppConfig::default();
        assert_eq!(config.api_url("/predict/"), "http://127.0.0.1:8000/api/v1/predict/");
        assert_eq!(config.api_url("/history/my-logs"), "http://127.0.0.1:8000/api/v1/history/my-logs");
    }

    #[test]
    fn token_ttl_defaults_to_one_day() {
        assert_eq!(AppConfig::default().token_ttl(), chrono::Duration::days(1));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig { log_level: "verbose".into(), ..AppConfig::default() };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
