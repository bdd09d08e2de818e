// catalog/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Every failure the catalog core can surface. Kinds are never translated on the way up;
/// the HTTP boundary maps them onto status codes.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Catalog store unavailable. Source: {source}")]
    StoreUnavailable {
        #[source]
        source: AnyhowError,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request halted by stage '{stage}'")]
    Halted { stage: String },
}

impl CatalogError {
    pub fn product_not_found(key: impl ToString) -> Self {
        CatalogError::NotFound {
            entity: "Product",
            key: key.to_string(),
        }
    }

    pub fn category_not_found(key: impl ToString) -> Self {
        CatalogError::NotFound {
            entity: "Category",
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

// Store implementations hand back anyhow errors for transport failures.
impl From<AnyhowError> for CatalogError {
    fn from(err: AnyhowError) -> Self {
        match err.downcast::<CatalogError>() {
            Ok(catalog_err) => catalog_err,
            Err(err) => CatalogError::StoreUnavailable { source: err },
        }
    }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
