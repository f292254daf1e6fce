//! Server settings: defaults, then an optional `config.toml`, then the
//! environment (after `.env` has been loaded).
//!
//! Keys are flat and match the environment variable names lowercased, so
//! `JWT_SECRET` sets `jwt_secret`.

use chrono::Duration;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::auth::TokenIssuer;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_lifetime_secs: i64,
    #[serde(default)]
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::build(Environment::default().try_parsing(true))
    }

    /// Build from an explicit set of variables instead of the process
    /// environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::build(Environment::default().try_parsing(true).source(Some(map)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("jwt_issuer", "stickies")?
            .set_default("jwt_lifetime_secs", 604_800)?
            .set_default("database_max_connections", 10)?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if settings.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must not be empty".into()));
        }
        if settings.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::Message("JWT_LIFETIME_SECS must be positive".into()));
        }
        Ok(settings)
    }

    /// Connection string, if one is configured and not blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_issuer(&self) -> Result<TokenIssuer, ConfigError> {
        TokenIssuer::new(
            &self.jwt_secret,
            self.jwt_issuer.clone(),
            Duration::seconds(self.jwt_lifetime_secs),
        )
        .map_err(|e| ConfigError::Message(format!("invalid JWT_SECRET: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_vars([("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(settings.jwt_issuer, "stickies");
        assert_eq!(settings.jwt_lifetime_secs, 604_800);
        assert_eq!(settings.database_max_connections, 10);
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
        assert_eq!(settings.database_url(), None);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_vars([
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/stickies"),
            ("JWT_LIFETIME_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.jwt_lifetime_secs, 60);
        assert_eq!(settings.database_url(), Some("postgres://localhost/stickies"));
    }

    #[test]
    fn test_secret_is_required() {
        assert!(Settings::from_vars(Vec::<(String, String)>::new()).is_err());
        assert!(Settings::from_vars([("JWT_SECRET", "   ")]).is_err());
    }

    #[test]
    fn test_blank_database_url_means_none() {
        let settings = Settings::from_vars([("JWT_SECRET", "s"), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(settings.database_url(), None);
    }
}
