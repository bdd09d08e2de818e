// catalog_server/src/web/handlers/credentials.rs

use actix_web::{http::header, FromRequest, HttpRequest};
use catalog::Credentials;
use futures_util::future::{ready, Ready};
use tracing::debug;

use crate::errors::AppError;

/// Bearer token from the `Authorization` header, if any. Whether it is required
/// is decided by the catalog stages, not here.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Credentials);

impl BearerToken {
  pub fn into_credentials(self) -> Credentials {
    self.0
  }

  fn from_header(value: Option<&header::HeaderValue>) -> Self {
    let token = value
      .and_then(|raw| raw.to_str().ok())
      .and_then(|raw| raw.strip_prefix("Bearer "))
      .map(str::trim)
      .filter(|token| !token.is_empty());
    if token.is_none() && value.is_some() {
      // Guarded operations refuse the request later; public reads ignore it.
      debug!("BearerToken extractor: ignoring non-Bearer Authorization header.");
    }
    BearerToken(token.map(str::to_string))
  }
}

impl FromRequest for BearerToken {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(Ok(BearerToken::from_header(req.headers().get(header::AUTHORIZATION))))
  }
}
