use secrecy::Secret;
use serde::Deserialize;

pub const DEFAULT_SWEEP_SCHEDULE: &str = "0 */15 * * * *";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Service-role connection string; reads through it bypass row-level security
    pub service_database_url: Option<Secret<String>>,
    pub host: String,
    pub port: u16,

    // CORS
    pub allowed_origins: Vec<String>,

    // Background expiry sweep
    pub token_sweep_enabled: bool,
    pub token_sweep_schedule: String,

    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &config::Config) -> Result<Self, config::ConfigError> {
        Ok(Self {
            service_database_url: optional::<String>(settings, "service_database_url")?
                .filter(|url| !url.trim().is_empty())
                .map(Secret::new),
            host: optional(settings, "host")?.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: optional(settings, "port")?.unwrap_or(8000),

            allowed_origins: optional::<String>(settings, "allowed_origins")?
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),

            token_sweep_enabled: optional(settings, "token_sweep_enabled")?.unwrap_or(true),
            token_sweep_schedule: optional(settings, "token_sweep_schedule")?
                .unwrap_or_else(|| DEFAULT_SWEEP_SCHEDULE.to_string()),

            run_migrations: optional(settings, "run_migrations")?.unwrap_or(true),
        })
    }
}

/// Reads a key, treating "not present" as `None` but surfacing malformed values.
fn optional<T: serde::de::DeserializeOwned>(
    settings: &config::Config,
    key: &str,
) -> Result<Option<T>, config::ConfigError> {
    match settings.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
