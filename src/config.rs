use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Maximum request body size in bytes. `None` leaves uploads unbounded.
    pub max_upload_size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Base URL prepended to `/uploads/<name>` when building attachment URLs
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// `redb://<path>` connection string for the record database
    pub database_url: String,
    /// Content directory for uploaded attachments
    pub upload_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            public_base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "redb://./data/customizations.redb".to_string(),
            upload_dir: "./uploads".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults_server = ServerConfig::default();
        let defaults_storage = StorageConfig::default();

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or(defaults_server.bind_address);
        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or(defaults_server.public_base_url);

        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults_storage.database_url);
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or(defaults_storage.upload_dir);

        let max_upload_size = match std::env::var("MAX_UPLOAD_SIZE") {
            Ok(raw) => Some(parse_byte_count("MAX_UPLOAD_SIZE", &raw)?),
            Err(_) => None,
        };

        let config = Config {
            server: ServerConfig {
                bind_address,
                public_base_url,
            },
            storage: StorageConfig {
                database_url,
                upload_dir,
            },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.server.public_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "PUBLIC_BASE_URL must start with http:// or https://, got '{base}'"
            )));
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "UPLOAD_DIR cannot be empty".to_string(),
            ));
        }

        if self.max_upload_size == Some(0) {
            tracing::warn!("MAX_UPLOAD_SIZE is 0; every request with a body will be rejected");
        }

        Ok(())
    }

    /// Public URL of an uploaded attachment.
    pub fn attachment_url(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.server.public_base_url.trim_end_matches('/'),
            crate::uploads::PUBLIC_PATH,
            file_name
        )
    }
}

/// Byte counts are `usize` so they never truncate when used as a body limit.
fn parse_byte_count(name: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!("{name} must be a byte count, got '{raw}'"))
    })
}
