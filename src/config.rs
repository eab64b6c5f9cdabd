use dotenv::dotenv;
use std::env;
use tracing::warn;

use crate::error::GatewayError;
use crate::models::room::RoomCatalog;

/// Process-wide gateway configuration, loaded once at startup and immutable
/// afterwards. The shared secret is held here and never logged.
pub struct GatewayConfig {
    base_url: Option<String>,
    secret: Option<String>,
    admin_username: Option<String>,
    pub rooms: RoomCatalog,
}

impl GatewayConfig {
    pub fn new(
        base_url: Option<String>,
        secret: Option<String>,
        admin_username: Option<String>,
        rooms: RoomCatalog,
    ) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            secret,
            admin_username,
            rooms,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A missing base URL or secret is not fatal here: the server still
    /// starts, and every gateway operation reports `config-missing` until
    /// the environment is fixed.
    pub fn from_env() -> Self {
        dotenv().ok();

        let base_url = env::var("BBB_BASE_URL").ok().filter(|v| !v.is_empty());
        let secret = env::var("BBB_SHARED_SECRET").ok().filter(|v| !v.is_empty());

        if base_url.is_none() || secret.is_none() {
            warn!("BBB_BASE_URL or BBB_SHARED_SECRET not set; all gateway calls will fail");
        }

        Self::new(
            base_url,
            secret,
            env::var("BBB_ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            RoomCatalog::from_env(),
        )
    }

    /// Base URL and shared secret, or the config-missing error that every
    /// operation surfaces when either is absent.
    pub fn credentials(&self) -> Result<(&str, &str), GatewayError> {
        match (self.base_url.as_deref(), self.secret.as_deref()) {
            (Some(base_url), Some(secret)) => Ok((base_url, secret)),
            _ => Err(GatewayError::config_missing()),
        }
    }

    /// Whether a caller-supplied name matches the configured administrator.
    /// Always false when no administrator is configured.
    pub fn is_admin(&self, full_name: &str) -> bool {
        self.admin_username.as_deref() == Some(full_name)
    }
}
