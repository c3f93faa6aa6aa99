use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Clinica";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the hosted data service base URL.
pub const ENV_SUPABASE_URL: &str = "CLINICA_SUPABASE_URL";
/// Environment variable holding the service's anonymous API key.
pub const ENV_SUPABASE_ANON_KEY: &str = "CLINICA_SUPABASE_ANON_KEY";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Connection settings for the hosted data service.
///
/// One base URL serves both surfaces: `/auth/v1` for identity and
/// `/rest/v1` for record collections.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
}

impl StoreConfig {
    /// Build a config from explicit values. Trailing slashes on the
    /// URL are trimmed so endpoint paths can be appended verbatim.
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Read the config from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = require_env(ENV_SUPABASE_URL)?;
        let anon_key = require_env(ENV_SUPABASE_ANON_KEY)?;
        Ok(Self::new(&url, &anon_key))
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}
