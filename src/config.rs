use serde::Deserialize;

/// Public base URL used in the descriptive landing output.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://grass-synonymous-zenith.glitch.me/apis";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Only used to build link text; routing never depends on it.
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data.db".to_string())
                .trim()
                .to_string(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
        };
        config.validate()?;

        tracing::debug!("Database URL: {}", config.database_url);
        tracing::debug!("Public base URL: {}", config.public_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL cannot be empty");
        }
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!("DATABASE_URL must start with sqlite:");
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            anyhow::bail!("PUBLIC_BASE_URL must start with http:// or https://");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data.db".to_string(),
            port: 3000,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_sqlite_database_url() {
        let config = Config {
            database_url: "postgres://localhost/registry".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_relative_base_url() {
        let config = Config {
            public_base_url: "/apis".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
