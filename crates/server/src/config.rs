use std::{collections::HashMap, fs};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("missing required configuration value: {name}")]
pub struct MissingConfig {
    pub name: &'static str,
}

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub do_api_token: Option<String>,
    pub do_base_url: String,
    pub frontend_origin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".into(),
            do_api_token: None,
            do_base_url: forwarder::DEFAULT_BASE_URL.into(),
            frontend_origin: "http://localhost:5173".into(),
        }
    }
}

impl Settings {
    /// The upstream token has no default; starting without one would turn
    /// every proxied call into a 401.
    pub fn require_token(&self) -> Result<String, MissingConfig> {
        self.do_api_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(MissingConfig {
                name: "DIGITALOCEAN_TOKEN",
            })
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("gestore.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("do_api_token") {
                settings.do_api_token = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("do_base_url") {
                settings.do_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("frontend_origin") {
                settings.frontend_origin = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("DIGITALOCEAN_TOKEN") {
        settings.do_api_token = Some(v);
    }
    if let Ok(v) = std::env::var("DIGITALOCEAN_BASE_URL") {
        settings.do_base_url = v;
    }
    if let Ok(v) = std::env::var("FRONTEND_URL") {
        settings.frontend_origin = v;
    }

    settings
}
