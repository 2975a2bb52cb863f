use std::env;
use std::path::PathBuf;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,

    /// Audit ledger endpoint; the demo notifier is used when unset
    pub audit_url: Option<String>,

    /// Dispatch settings file layered over the defaults
    pub config_file: Option<PathBuf>,

    /// Seed file; the embedded demo directory is used when unset
    pub seed_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            cors_origin: "http://localhost:3000".to_string(),
            audit_url: None,
            config_file: None,
            seed_file: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("FIELDNAV_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origin = env::var("FIELDNAV_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let audit_url = env::var("FIELDNAV_AUDIT_URL").ok().filter(|url| !url.trim().is_empty());
        let config_file = env::var("FIELDNAV_CONFIG").ok().map(PathBuf::from);
        let seed_file = env::var("FIELDNAV_SEED").ok().map(PathBuf::from);

        Self {
            port,
            cors_origin,
            audit_url,
            config_file,
            seed_file,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Check if audit events go to a remote ledger
    pub fn uses_http_audit(&self) -> bool {
        self.audit_url.is_some()
    }
}
