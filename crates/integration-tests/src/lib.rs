//! Integration tests for Motoshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p motoshop-integration-tests
//! ```
//!
//! No network access is needed: [`MockCatalog`] serves the product listing
//! from a local `axum` server bound to an ephemeral port.
//!
//! # Test Categories
//!
//! - `catalog_fetch` - HTTP client and loader against the mock server
//! - `cart_properties` - Property-based checks of the cart reducer

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use motoshop_core::{Price, ProductId};
use motoshop_storefront::{CatalogConfig, Product};
use rust_decimal::Decimal;

/// What the mock catalog answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with the given JSON body.
    Json(serde_json::Value),
    /// The given status with a plain-text body.
    Status(StatusCode),
    /// 200 with an arbitrary body.
    Raw(String),
}

/// A request seen by the mock catalog.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub category: String,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
struct MockState {
    response: MockResponse,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<RecordedRequest>>>,
}

/// Local stand-in for the catalog API.
pub struct MockCatalog {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<RecordedRequest>>>,
}

impl MockCatalog {
    /// Start a server answering every listing request with `response`.
    pub async fn spawn(response: MockResponse) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(None));
        let state = MockState {
            response,
            hits: Arc::clone(&hits),
            last_request: Arc::clone(&last_request),
        };

        let app = Router::new()
            .route("/products/category/{category}", get(list_products))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            hits,
            last_request,
        }
    }

    /// Catalog config pointing at this server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: format!("http://{}", self.addr),
            ..CatalogConfig::default()
        }
    }

    /// Number of listing requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The most recent listing request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

async fn list_products(
    State(state): State<MockState>,
    Path(category): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().unwrap() = Some(RecordedRequest { category, query });

    match state.response {
        MockResponse::Json(body) => axum::Json(body).into_response(),
        MockResponse::Status(status) => (status, "upstream exploded").into_response(),
        MockResponse::Raw(body) => body.into_response(),
    }
}

/// Listing body in the catalog API's shape.
#[must_use]
pub fn motorcycle_listing() -> serde_json::Value {
    serde_json::json!({
        "products": [
            {
                "id": 166,
                "title": "Generic Motorcycle",
                "price": 3999.99,
                "thumbnail": "https://cdn.dummyjson.com/products/images/motorcycle/generic-motorcycle/thumbnail.png",
                "description": "A versatile and reliable motorcycle."
            },
            {
                "id": 167,
                "title": "Kawasaki Z800",
                "price": 8999.99,
                "thumbnail": "https://cdn.dummyjson.com/products/images/motorcycle/kawasaki-z800/thumbnail.png",
                "description": "A powerful and agile sportbike."
            },
            {
                "id": 168,
                "title": "MotoGP CI.H1",
                "price": 14999.99,
                "thumbnail": "https://cdn.dummyjson.com/products/images/motorcycle/motogp-ci.h1/thumbnail.png",
                "description": "A high-performance motorcycle for racing."
            }
        ],
        "total": 3,
        "skip": 0,
        "limit": 12
    })
}

/// A product with a whole-number price, for reducer tests.
#[must_use]
pub fn product(id: i32, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Bike {id}"),
        price: Price::new(Decimal::from(price)),
        thumbnail: format!("t{id}"),
        description: String::new(),
    }
}
