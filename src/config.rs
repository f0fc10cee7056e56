use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Backend base URL the sync stores reconcile against.
    pub remote_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::with_profile_override(None)
    }

    /// `--profile` on the command line takes precedence over the PROFILE
    /// environment variable.
    pub fn with_profile_override(profile_override: Option<String>) -> Self {
        let profile = profile_override
            .or_else(|| env::var("PROFILE").ok())
            .unwrap_or_else(|| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://pricing_studio.db?mode=rwc".to_string()
            } else {
                format!("sqlite://pricing_studio_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            remote_url: env::var("REMOTE_URL").ok(),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            profile,
        }
    }
}
