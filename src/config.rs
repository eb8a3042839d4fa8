use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,

    // Storage
    pub database_url: String,

    // Server
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,

    // Content
    pub locales_dir: String,
    pub media_url: String,
    pub public_base_url: Option<String>,

    // Admin
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            // Storage
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://gardablick.db?mode=rwc".to_string()),

            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: parse_list(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
            ),

            // Content
            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),
            media_url: std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string()),
            public_base_url: non_empty_var("PUBLIC_BASE_URL"),

            // Admin - unset disables the admin surface entirely
            admin_api_key: non_empty_var("ADMIN_API_KEY"),
        };

        if let Some(base) = &config.public_base_url {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                bail!(
                    "PUBLIC_BASE_URL must start with http:// or https://, got '{}'",
                    base
                );
            }
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
