// catalog_server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Catalog(err) => catalog_error_response(err),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) | AppError::Migrate(_) => {
        HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

fn catalog_error_response(err: &CatalogError) -> HttpResponse {
  let body = json!({"error": err.to_string()});
  match err {
    CatalogError::NotFound { .. } => HttpResponse::NotFound().json(body),
    CatalogError::Conflict(_) => HttpResponse::Conflict().json(body),
    CatalogError::InvalidReference(_) => HttpResponse::UnprocessableEntity().json(body),
    CatalogError::StoreUnavailable { .. } => {
      HttpResponse::ServiceUnavailable().json(json!({"error": "Catalog store unavailable"}))
    }
    CatalogError::Validation(_) => HttpResponse::BadRequest().json(body),
    CatalogError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
    CatalogError::Halted { .. } => HttpResponse::Conflict().json(body),
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
