// catalog_server/src/web/handlers/tests.rs

use actix_web::{http::StatusCode, test, web as actix_data, App};
use catalog::{
  CatalogQueryEngine, CatalogService, Category, EngineSettings, InMemoryStore, NoopObserver, Product, SimilarMatch,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::pipelines::build_stage_chain;
use crate::services::auth_service::hash_secret;
use crate::state::AppState;
use crate::web::configure_app_routes;

const ADMIN_TOKEN: &str = "catalog-admin-token";

struct Seeded {
  state: AppState,
  shoes: Category,
  runner: Product,
}

fn test_config(read_only: bool) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: String::new(),
    run_migrations: false,
    default_page_size: 12,
    similar_match: SimilarMatch::CategoryName,
    read_only,
    admin_token_hash: Some(hash_secret(ADMIN_TOKEN).unwrap()),
  }
}

fn seeded_state(read_only: bool) -> Seeded {
  let store = Arc::new(InMemoryStore::new());
  let shoes = store.put_category(Category {
    id: Uuid::new_v4(),
    name: "Shoes".to_string(),
    slug: "shoes".to_string(),
  });
  store.put_category(Category {
    id: Uuid::new_v4(),
    name: "Socks".to_string(),
    slug: "socks".to_string(),
  });

  let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
  let seed = |name: &str, slug: &str, price: i32, minutes: i64| Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    slug: slug.to_string(),
    description: format!("{} description", name),
    price,
    images: vec![format!("https://img.example.com/{}.jpg", slug)],
    category_id: Some(shoes.id),
    created_at: base + Duration::minutes(minutes),
  };
  let runner = store.put_product(seed("Trail Runner", "trail-runner", 10, 0));
  store.put_product(seed("Canvas Sneaker", "canvas-sneaker", 5, 1));
  store.put_product(seed("Court Classic", "court-classic", 30, 2));

  let config = test_config(read_only);
  let engine = CatalogQueryEngine::with_observer(store, Arc::new(NoopObserver), EngineSettings::default());
  let catalog = CatalogService::new(engine, build_stage_chain(&config));
  Seeded {
    state: AppState {
      catalog: Arc::new(catalog),
      config: Arc::new(config),
    },
    shoes,
    runner,
  }
}

macro_rules! app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(actix_data::Data::new($state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

fn bearer() -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", ADMIN_TOKEN))
}

#[actix_web::test]
async fn health_check_reports_ok() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn listing_honours_sort_and_window() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get()
    .uri("/api/v1/products?sort=price-asc&page=1&perPage=2")
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;

  assert_eq!(body["totalCount"], json!(3));
  let prices: Vec<i64> = body["items"]
    .as_array()
    .unwrap()
    .iter()
    .map(|item| item["price"].as_i64().unwrap())
    .collect();
  assert_eq!(prices, vec![5, 10]);
}

#[actix_web::test]
async fn unknown_sort_falls_back_to_newest() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/products?sort=bogus").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["items"][0]["slug"], json!("court-classic"));
}

#[actix_web::test]
async fn product_lookups_return_detail() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/products/by-slug/trail-runner").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["id"], json!(seeded.runner.id));
  assert_eq!(body["category"]["slug"], json!("shoes"));

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/products/{}", Uuid::new_v4()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn similar_excludes_anchor() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/products/similar/{}", seeded.runner.id))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let slugs: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
  assert_eq!(slugs, vec!["court-classic", "canvas-sneaker"]);
}

#[actix_web::test]
async fn empty_category_lists_no_products() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/products/by-category/socks").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn mutations_require_admin_token() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::post().uri("/api/v1/products").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/products/{}", seeded.runner.id))
    .insert_header(("Authorization", "Bearer wrong-token"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/categories/{}", seeded.shoes.id))
    .insert_header(("Authorization", "Basic abc"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_then_update_derives_slug() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::post().uri("/api/v1/products").insert_header(bearer()).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  let id = created["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::put()
    .uri(&format!("/api/v1/products/{}", id))
    .insert_header(bearer())
    .set_json(json!({
      "name": "Hiking Boot XL",
      "description": "Waterproof",
      "price": 120,
      "images": ["https://img.example.com/boot.jpg"],
      "categoryId": seeded.shoes.id,
    }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["slug"], json!("hiking-boot-xl"));
  assert_eq!(body["category"]["name"], json!("Shoes"));
}

#[actix_web::test]
async fn update_rejects_invalid_payload_and_unknown_category() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);
  let uri = format!("/api/v1/products/{}", seeded.runner.id);

  let req = test::TestRequest::put()
    .uri(&uri)
    .insert_header(bearer())
    .set_json(json!({ "name": "  ", "price": 1, "categoryId": seeded.shoes.id }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::put()
    .uri(&uri)
    .insert_header(bearer())
    .set_json(json!({ "name": "Renamed", "price": 1, "categoryId": Uuid::new_v4() }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_is_not_found_for_missing_product() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/products/{}", seeded.runner.id))
    .insert_header(bearer())
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/products/{}", seeded.runner.id))
    .insert_header(bearer())
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn read_only_catalog_halts_mutations() {
  let seeded = seeded_state(true);
  let app = app!(seeded.state);

  let req = test::TestRequest::post().uri("/api/v1/products").insert_header(bearer()).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn category_reads() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get().uri("/api/v1/categories/by-slug/shoes").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["id"], json!(seeded.shoes.id));

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/categories/{}", seeded.shoes.id))
    .insert_header(bearer())
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["name"], json!("Shoes"));

  let req = test::TestRequest::get().uri("/api/v1/categories/by-slug/missing").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn public_reads_ignore_non_bearer_authorization() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::get()
    .uri("/api/v1/products")
    .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/v1/categories/by-slug/shoes")
    .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn update_with_symbol_only_name_is_rejected() {
  let seeded = seeded_state(false);
  let app = app!(seeded.state);

  let req = test::TestRequest::put()
    .uri(&format!("/api/v1/products/{}", seeded.runner.id))
    .insert_header(bearer())
    .set_json(json!({ "name": "!!!", "price": 1, "categoryId": seeded.shoes.id }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::get().uri("/api/v1/products/by-slug/trail-runner").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
