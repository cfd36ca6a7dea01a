//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::DEFAULT_SESSION_EXPIRY_HOURS;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// HMAC secret for session tokens. Empty means generate one per process.
    #[serde(default)]
    pub secret: String,
    pub expiry_hours: i64,
    pub secure_cookie: bool,
}

/// First-run admin account, used only while `usuarios` is empty.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BootstrapSettings {
    pub admin_username: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl BootstrapSettings {
    pub fn admin_credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.admin_username, &self.admin_email, &self.admin_password) {
            (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
                Some((u.as_str(), e.as_str(), p.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Directory for a daily rolling log file, stdout only when unset.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            directory: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "guiargo-panel")?
            .set_default("app.static_dir", "static")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("session.expiry_hours", DEFAULT_SESSION_EXPIRY_HOURS)?
            .set_default("session.secure_cookie", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_requires_all_fields() {
        let mut b = BootstrapSettings::default();
        assert!(b.admin_credentials().is_none());

        b.admin_username = Some("admin".into());
        b.admin_email = Some("admin@guiargo.mx".into());
        assert!(b.admin_credentials().is_none());

        b.admin_password = Some("cambiar123".into());
        assert_eq!(
            b.admin_credentials(),
            Some(("admin", "admin@guiargo.mx", "cambiar123"))
        );
    }

    #[test]
    fn test_blank_bootstrap_password_is_ignored() {
        let b = BootstrapSettings {
            admin_username: Some("admin".into()),
            admin_email: Some("admin@guiargo.mx".into()),
            admin_password: Some(String::new()),
        };
        assert!(b.admin_credentials().is_none());
    }
}
