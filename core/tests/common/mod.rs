// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every fixture

use catalog::{
  CatalogQueryEngine, Category, CategoryKey, EngineSettings, InMemoryStore, Product, QueryEvent, QueryObserver,
  SimilarMatch,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Fixture Catalog ---
//
// Shoes: A (price 10, oldest), B (price 5)
// Hats:  C (price 20, newest)
// Socks: no products

pub struct Fixture {
  pub store: Arc<InMemoryStore>,
  pub engine: CatalogQueryEngine,
  pub observer: Arc<RecordingObserver>,
  pub shoes: Category,
  pub hats: Category,
  pub socks: Category,
  pub a: Product,
  pub b: Product,
  pub c: Product,
}

pub fn base_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn category(name: &str, slug: &str) -> Category {
  Category {
    id: Uuid::new_v4(),
    name: name.to_string(),
    slug: slug.to_string(),
  }
}

pub fn product(name: &str, description: &str, price: i32, category: &Category, minutes: i64) -> Product {
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    slug: catalog::to_slug(name),
    description: description.to_string(),
    price,
    images: vec![format!("https://img.example.com/{}.jpg", catalog::to_slug(name))],
    category_id: Some(category.id),
    created_at: base_time() + Duration::minutes(minutes),
  }
}

pub fn fixture() -> Fixture {
  fixture_with(EngineSettings::default())
}

pub fn fixture_with(settings: EngineSettings) -> Fixture {
  setup_tracing();
  let store = Arc::new(InMemoryStore::new());
  let shoes = store.put_category(category("Shoes", "shoes-slug"));
  let hats = store.put_category(category("Hats", "hats"));
  let socks = store.put_category(category("Socks", "socks"));

  let a = store.put_product(product("Trail Runner", "Grippy outsole for muddy paths", 10, &shoes, 0));
  let b = store.put_product(product("Canvas Sneaker", "Light everyday shoe", 5, &shoes, 1));
  let c = store.put_product(product("Wool Beanie", "Warm knit for winter", 20, &hats, 2));

  let observer = Arc::new(RecordingObserver::default());
  let engine = CatalogQueryEngine::with_observer(store.clone(), observer.clone(), settings);

  Fixture {
    store,
    engine,
    observer,
    shoes,
    hats,
    socks,
    a,
    b,
    c,
  }
}

pub fn by_id_settings() -> EngineSettings {
  EngineSettings {
    similar_match: SimilarMatch::CategoryId,
    ..EngineSettings::default()
  }
}

// --- Observer capturing every query the engine issues ---
#[derive(Default)]
pub struct RecordingObserver {
  pub queries: Mutex<Vec<String>>,
  pub category_lookups: Mutex<Vec<CategoryKey>>,
}

impl RecordingObserver {
  pub fn operations(&self) -> Vec<String> {
    self.queries.lock().clone()
  }
}

impl QueryObserver for RecordingObserver {
  fn on_query(&self, event: QueryEvent<'_>) {
    self.queries.lock().push(event.operation.to_string());
  }

  fn on_category_lookup(&self, key: &CategoryKey) {
    self.category_lookups.lock().push(key.clone());
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
