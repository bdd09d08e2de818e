// catalog_server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use catalog::{EngineSettings, SimilarMatch, DEFAULT_PAGE_SIZE};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub run_migrations: bool,

  // Catalog engine tuning
  pub default_page_size: i64,
  pub similar_match: SimilarMatch,
  pub read_only: bool,

  // Argon2 PHC string of the admin bearer token. Without it every guarded call is refused.
  pub admin_token_hash: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let run_migrations = get_env("RUN_MIGRATIONS")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;

    let default_page_size = get_env("CATALOG_PAGE_SIZE")
      .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_PAGE_SIZE: {}", e)))?;
    if default_page_size <= 0 {
      return Err(AppError::Config(format!(
        "CATALOG_PAGE_SIZE must be positive, got {}",
        default_page_size
      )));
    }
    let similar_match = get_env("CATALOG_SIMILAR_MATCH")
      .unwrap_or_else(|_| "category-name".to_string())
      .parse::<SimilarMatch>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_SIMILAR_MATCH: {}", e)))?;
    let read_only = get_env("CATALOG_READ_ONLY")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_READ_ONLY value: {}", e)))?;

    let admin_token_hash = get_env("ADMIN_TOKEN_HASH").ok().filter(|h| !h.trim().is_empty());
    if admin_token_hash.is_none() {
      tracing::warn!("ADMIN_TOKEN_HASH is not set; product mutations will be refused.");
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      run_migrations,
      default_page_size,
      similar_match,
      read_only,
      admin_token_hash,
    })
  }

  pub fn engine_settings(&self) -> EngineSettings {
    EngineSettings {
      default_per_page: self.default_page_size,
      similar_match: self.similar_match,
    }
  }
}
