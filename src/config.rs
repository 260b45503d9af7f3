//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity service may live on a different origin than the static
//! bundle. Its base URI is baked in at compile time from `USER_SERVICE_URI`;
//! an unset or empty value means "same origin".

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// `localStorage` key holding the current bearer token.
pub const TOKEN_STORAGE_KEY: &str = "jwt";

/// Client configuration provided to components via context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Identity service base URI without a trailing slash.
    pub user_service_uri: String,
    /// Storage key for the persisted bearer token.
    pub token_key: String,
    /// Console log level used when the browser logger is installed.
    pub log_level: log::Level,
}

impl ClientConfig {
    /// Build a config for the given service base URI.
    pub fn new(user_service_uri: &str) -> Self {
        Self {
            user_service_uri: user_service_uri.trim().trim_end_matches('/').to_owned(),
            token_key: TOKEN_STORAGE_KEY.to_owned(),
            log_level: log::Level::Info,
        }
    }

    /// Config from the compile-time environment.
    pub fn from_build_env() -> Self {
        let mut config = Self::new(option_env!("USER_SERVICE_URI").unwrap_or_default());
        if let Some(level) = option_env!("CLIENT_LOG_LEVEL").and_then(|raw| raw.parse().ok()) {
            config.log_level = level;
        }
        config
    }

    /// Join `path` onto the service base URI.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.user_service_uri)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
