// catalog_server/src/services/auth_service.rs

//! Hashing and verification of the admin bearer token.

use crate::errors::AppError; // Application-specific error type
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use tracing::{debug, error, instrument};

/// Hashes a secret into an Argon2 PHC string suitable for `ADMIN_TOKEN_HASH`.
#[instrument(name = "auth_service::hash_secret", skip(secret), err(Display))]
pub fn hash_secret(secret: &str) -> Result<String, AppError> {
  if secret.is_empty() {
    error!("Secret hashing failed: secret cannot be empty.");
    return Err(AppError::Config("Admin token cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 hashing failed.");
      AppError::Internal(format!("Secret hashing process failed: {}", argon_err))
    })
}

/// Checks a presented secret against a stored Argon2 hash.
///
/// `Ok(false)` means the secret is wrong; `Err` means the stored hash itself is unusable.
#[instrument(name = "auth_service::verify_secret", skip(stored_hash, presented), err(Display), fields(hash_len = stored_hash.len()))]
pub fn verify_secret(stored_hash: &str, presented: &str) -> Result<bool, AppError> {
  if presented.is_empty() {
    debug!("Empty secret presented.");
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored admin token hash.");
    AppError::Config(format!("Invalid ADMIN_TOKEN_HASH format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(presented.as_bytes(), &parsed_hash) {
    Ok(()) => {
      debug!("Secret verification successful.");
      Ok(true)
    }
    Err(argon2::password_hash::Error::Password) => {
      debug!("Secret verification failed: mismatch.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Secret verification process failed: {}",
        other_argon_err
      )))
    }
  }
}
