//! Central module for application-wide configuration settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `PERSONS__*` environment variables (`__` separates nesting levels, e.g.
//! `PERSONS__AUTH__SECRET`), then command-line flags. The result is read once
//! at startup and never reloaded.

use std::net::SocketAddr;
use std::path::PathBuf;

use adapters::User;
use anyhow::{bail, Context, Result};
use clap::Parser;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::auth::{KeySet, SigningKey};

#[derive(Parser, Debug)]
#[command(author, version, about = "Person registry HTTP service")]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "PERSONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:5000
    #[arg(short, long, env = "PERSONS_BIND")]
    pub bind: Option<SocketAddr>,

    /// Log filter, e.g. `info` or `persons=debug`
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "default_users")]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for new tokens. Required.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_key_id")]
    pub key_id: String,
    /// Keys that no longer sign but still verify tokens issued before a rotation.
    #[serde(default)]
    pub retired_keys: Vec<RetiredKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetiredKey {
    pub key_id: String,
    pub secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            key_id: default_key_id(),
            retired_keys: Vec::new(),
        }
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_key_id() -> String {
    "primary".to_string()
}

fn default_users() -> Vec<User> {
    vec![
        User {
            username: "batman".to_string(),
            password: "batman".to_string(),
            role: "manager".to_string(),
        },
        User {
            username: "robin".to_string(),
            password: "robin".to_string(),
            role: "employee".to_string(),
        },
    ]
}

impl AppConfig {
    pub fn load(args: &Args) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = &args.config {
            builder = builder.add_source(File::from(path.as_path()));
        }
        builder = builder.add_source(
            Environment::with_prefix("PERSONS")
                .prefix_separator("__")
                .separator("__"),
        );

        let mut config: AppConfig = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        if let Some(bind) = args.bind {
            config.bind_address = bind;
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.secret.trim().is_empty() {
            bail!("auth.secret must be set (e.g. PERSONS__AUTH__SECRET)");
        }
        if self.auth.key_id.trim().is_empty() {
            bail!("auth.key_id must not be empty");
        }
        for key in &self.auth.retired_keys {
            if key.secret.trim().is_empty() {
                bail!("retired key '{}' has an empty secret", key.key_id);
            }
        }
        Ok(())
    }

    pub fn key_set(&self) -> KeySet {
        KeySet::new(
            SigningKey::new(self.auth.key_id.clone(), self.auth.secret.as_bytes()),
            self.auth
                .retired_keys
                .iter()
                .map(|k| SigningKey::new(k.key_id.clone(), k.secret.as_bytes()))
                .collect(),
        )
    }
}
