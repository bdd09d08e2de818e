// catalog_server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{category_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Literal segments are registered ahead of `/{product_id}`.
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("/similar/{product_id}", web::get().to(product_handlers::similar_products_handler))
          .route("/by-slug/{slug}", web::get().to(product_handlers::get_product_by_slug_handler))
          .route(
            "/by-category/{category_slug}",
            web::get().to(product_handlers::products_by_category_handler),
          )
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .service(
        web::scope("/categories")
          .route("", web::get().to(category_handlers::list_categories_handler))
          .route("/by-slug/{slug}", web::get().to(category_handlers::get_category_by_slug_handler))
          .route("/{category_id}", web::get().to(category_handlers::get_category_handler)),
      ),
  );
}
