// catalog_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog::{ListProductsQuery, ProductChanges};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::credentials::BearerToken;
use crate::errors::AppError;
use crate::state::AppState;

#[instrument(
  name = "handler::list_products",
  skip(app_state, query_params, token),
  fields(sort = ?query_params.sort, page = ?query_params.page)
)]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let page = app_state
    .catalog
    .list_products(token.into_credentials(), &query_params)
    .await?;
  info!(
    "Listed {} products ({} matching in total).",
    page.items.len(),
    page.total_count
  );
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::create_product", skip(app_state, token))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let id = app_state.catalog.create_product(token.into_credentials()).await?;
  info!(product_id = %id, "Draft product created.");
  Ok(HttpResponse::Created().json(json!({ "id": id })))
}

#[instrument(name = "handler::get_product", skip(app_state, path, token), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .get_product(token.into_credentials(), path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::get_product_by_slug", skip(app_state, path, token), fields(slug = %path.as_str()))]
pub async fn get_product_by_slug_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .get_product_by_slug(token.into_credentials(), &path)
    .await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(
  name = "handler::products_by_category",
  skip(app_state, path, token),
  fields(category_slug = %path.as_str())
)]
pub async fn products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let products = app_state
    .catalog
    .get_products_by_category(token.into_credentials(), &path)
    .await?;
  info!("Found {} products in category.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::similar_products", skip(app_state, path, token), fields(product_id = %path.as_ref()))]
pub async fn similar_products_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let similar = app_state
    .catalog
    .get_similar_products(token.into_credentials(), path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(similar))
}

#[instrument(
  name = "handler::update_product",
  skip(app_state, path, payload, token),
  fields(product_id = %path.as_ref(), category_id = %payload.category_id)
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<ProductChanges>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .update_product(token.into_credentials(), path.into_inner(), payload.into_inner())
    .await?;
  info!(slug = %product.slug, "Product updated.");
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, path, token), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  token: BearerToken,
) -> Result<HttpResponse, AppError> {
  app_state
    .catalog
    .delete_product(token.into_credentials(), path.into_inner())
    .await?;
  info!("Product deleted.");
  Ok(HttpResponse::NoContent().finish())
}
