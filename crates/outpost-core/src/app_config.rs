use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the ordering API, without a trailing slash
    /// (e.g. `https://host.example.com/dev`).
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    /// Lifetime of the access-token credential stored after a merchant fetch.
    pub credential_ttl_secs: u64,
    /// Where `outpost scan` writes the scanned identifiers.
    pub session_path: PathBuf,
}
