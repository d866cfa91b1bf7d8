use std::{collections::HashMap, fs};

use thiserror::Error;

use crate::jwt::TokenConfig;

#[derive(Debug, Error)]
#[error("missing required configuration value: {name}")]
pub struct MissingConfig {
    pub name: &'static str,
}

#[derive(Debug)]
pub struct AuthSettings {
    pub bind_addr: String,
    pub database_url: String,
    pub jwt_secret: Option<String>,
    pub jwt_ttl_seconds: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3002".into(),
            database_url: "sqlite://./data/users.db".into(),
            jwt_secret: None,
            jwt_ttl_seconds: 3600,
        }
    }
}

impl AuthSettings {
    /// The JWT secret has no usable default; refusing to start without it
    /// beats minting forgeable tokens.
    pub fn token_config(&self) -> Result<TokenConfig, MissingConfig> {
        let secret = self
            .jwt_secret
            .clone()
            .filter(|secret| !secret.is_empty())
            .ok_or(MissingConfig { name: "JWT_SECRET" })?;
        Ok(TokenConfig {
            secret,
            ttl_seconds: self.jwt_ttl_seconds,
        })
    }
}

pub fn load_settings() -> AuthSettings {
    let mut settings = AuthSettings::default();

    if let Ok(raw) = fs::read_to_string("auth.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
            if let Some(v) = file_cfg.get("jwt_secret") {
                settings.jwt_secret = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("jwt_ttl_seconds") {
                if let Ok(parsed) = v.parse::<i64>() {
                    settings.jwt_ttl_seconds = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("AUTH_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("AUTH_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("JWT_SECRET") {
        settings.jwt_secret = Some(v);
    }
    if let Ok(v) = std::env::var("JWT_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.jwt_ttl_seconds = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_config_requires_a_secret() {
        let settings = AuthSettings::default();
        let err = settings.token_config().expect_err("no secret configured");
        assert_eq!(err.name, "JWT_SECRET");

        let empty = AuthSettings {
            jwt_secret: Some(String::new()),
            ..AuthSettings::default()
        };
        assert!(empty.token_config().is_err());
    }

    #[test]
    fn token_config_carries_secret_and_ttl() {
        let settings = AuthSettings {
            jwt_secret: Some("s3cret".into()),
            jwt_ttl_seconds: 120,
            ..AuthSettings::default()
        };
        let tokens = settings.token_config().expect("configured");
        assert_eq!(tokens.secret, "s3cret");
        assert_eq!(tokens.ttl_seconds, 120);
    }
}
