//! Command-line and environment configuration

use clap::Args;
use std::path::PathBuf;
use thiserror::Error;

use crate::http::HttpConfig;
use crate::store::BoltConfig;

/// Configuration errors reported before the server binds
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("graph store connection is not fully configured, missing: {}", .0.join(", "))]
    MissingStoreSettings(Vec<&'static str>),
}

/// Graph store connection settings
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Bolt URI of the graph store (fallback env: BOLT_URL)
    #[arg(long, env = "NEO4J_URI")]
    pub uri: Option<String>,

    /// Store user (fallback env: NEO4J_USERNAME)
    #[arg(long, env = "NEO4J_USER")]
    pub user: Option<String>,

    /// Store password
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Maximum pooled store connections
    #[arg(long, env = "GRAPH_LENS_MAX_CONNECTIONS", default_value_t = 16)]
    pub max_connections: usize,
}

impl StoreArgs {
    /// Resolve into a Bolt configuration, reporting every missing setting at once
    pub fn resolve(&self) -> Result<BoltConfig, ConfigError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(
        &self,
        fallback_env: impl Fn(&str) -> Option<String>,
    ) -> Result<BoltConfig, ConfigError> {
        let uri = non_empty(self.uri.clone()).or_else(|| non_empty(fallback_env("BOLT_URL")));
        let user =
            non_empty(self.user.clone()).or_else(|| non_empty(fallback_env("NEO4J_USERNAME")));
        let password = non_empty(self.password.clone());

        match (uri, user, password) {
            (Some(uri), Some(user), Some(password)) => Ok(BoltConfig {
                uri,
                user,
                password,
                max_connections: self.max_connections.max(1),
            }),
            (uri, user, password) => {
                let mut missing = Vec::new();
                if uri.is_none() {
                    missing.push("NEO4J_URI");
                }
                if user.is_none() {
                    missing.push("NEO4J_USER");
                }
                if password.is_none() {
                    missing.push("NEO4J_PASSWORD");
                }
                Err(ConfigError::MissingStoreSettings(missing))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// HTTP listener settings
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, env = "GRAPH_LENS_ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Directory of visualization client assets
    #[arg(long, env = "GRAPH_LENS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Leave store diagnostics out of 500 responses
    #[arg(long, env = "GRAPH_LENS_HIDE_ERROR_DETAIL")]
    pub hide_error_detail: bool,
}

impl From<&ServeArgs> for HttpConfig {
    fn from(args: &ServeArgs) -> Self {
        HttpConfig {
            address: args.address.clone(),
            port: args.port,
            static_dir: args.static_dir.clone(),
            expose_error_detail: !args.hide_error_detail,
        }
    }
}
