// catalog_server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;
use uuid::Uuid;

use super::credentials::BearerToken;
use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state, token))]
pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let categories = app_state.catalog.list_categories(token.into_credentials()).await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category_by_slug", skip(app_state, path, token), fields(slug = %path.as_str()))]
pub async fn get_category_by_slug_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let category = app_state
    .catalog
    .get_category_by_slug(token.into_credentials(), &path)
    .await?;
  Ok(HttpResponse::Ok().json(category))
}

/// Admin only; the `require_admin` stage guards it.
#[instrument(name = "handler::get_category", skip(app_state, path, token), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let category = app_state
    .catalog
    .get_category(token.into_credentials(), path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(category))
}
