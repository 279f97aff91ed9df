//! Catalog loading.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──load()──> Loading ──ok──> Ready
//!                          └─err─> Failed
//! ```
//!
//! The loader fetches exactly once per lifetime. A failed load keeps whatever
//! product list was present (initially empty) and exposes the fixed
//! [`FETCH_FAILED_MESSAGE`] instead of the underlying error.
//!
//! State lives in a `tokio::sync::watch` channel, so readers and subscribers
//! see `Loading` while the fetch is still in flight.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::Product;

use chrono::{DateTime, Utc};
use motoshop_core::ProductId;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

/// Message exposed to consumers when the catalog could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Fetch FAILED!";

/// Errors that can occur while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API answered with a non-success status.
    #[error("Catalog API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce the product list.
///
/// [`CatalogClient`] is the production implementation.
pub trait ProductSource {
    /// Fetch the full product list.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Where the catalog is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// The catalog as seen by consumers.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    status: LoadStatus,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// Products fetched so far (empty until a load succeeds).
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// True only while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// User-facing error message, set when the load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the product list was last replaced.
    #[must_use]
    pub const fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Move from `Idle` to `Loading`.
    ///
    /// Returns `false` (and changes nothing) if a load was already started.
    pub fn begin_load(&mut self) -> bool {
        if self.status != LoadStatus::Idle {
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Record the outcome of the fetch started by [`CatalogState::begin_load`].
    pub fn complete_load(&mut self, result: Result<Vec<Product>, CatalogError>) {
        match result {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
                self.status = LoadStatus::Ready;
                self.error = None;
                self.loaded_at = Some(Utc::now());
            }
            Err(e) => {
                error!(error = %e, "Catalog fetch failed");
                self.status = LoadStatus::Failed;
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }
}

/// Owns a [`ProductSource`] and publishes the resulting [`CatalogState`].
pub struct CatalogLoader<S> {
    source: S,
    state: watch::Sender<CatalogState>,
}

impl<S: ProductSource> CatalogLoader<S> {
    /// Create an idle loader.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: watch::Sender::new(CatalogState::default()),
        }
    }

    /// Fetch the catalog if it has never been fetched.
    ///
    /// The state is `Loading` for as long as the fetch is pending. Later (or
    /// overlapping) calls return the current status without touching the
    /// network.
    #[instrument(skip(self))]
    pub async fn load(&self) -> LoadStatus {
        if !self.state.send_if_modified(CatalogState::begin_load) {
            let status = self.state.borrow().status();
            debug!(?status, "Catalog load already started, skipping fetch");
            return status;
        }

        let result = self.source.fetch_products().await;
        self.state.send_modify(|state| state.complete_load(result));
        self.state.borrow().status()
    }

    /// Current state. Do not hold the guard across an `.await`.
    #[must_use]
    pub fn state(&self) -> watch::Ref<'_, CatalogState> {
        self.state.borrow()
    }

    /// Receiver notified on every lifecycle transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use motoshop_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn bike(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Bike {id}"),
            price: Price::new(Decimal::from(price)),
            thumbnail: format!("t{id}"),
            description: String::new(),
        }
    }

    /// Source that counts calls and answers from a canned result.
    struct FakeSource {
        calls: AtomicUsize,
        status: Option<reqwest::StatusCode>,
        products: Vec<Product>,
    }

    impl FakeSource {
        fn ok(products: Vec<Product>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                status: None,
                products,
            }
        }

        fn failing(status: reqwest::StatusCode) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                status: Some(status),
                products: Vec::new(),
            }
        }
    }

    impl ProductSource for FakeSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(CatalogError::Status(status)),
                None => Ok(self.products.clone()),
            }
        }
    }

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let state = CatalogState::default();
        assert_eq!(state.status(), LoadStatus::Idle);
        assert!(!state.is_loading());
        assert!(state.products().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_loading_flag_transitions_on_failure() {
        let mut state = CatalogState::default();
        assert!(state.begin_load());
        assert!(state.is_loading());

        state.complete_load(Err(CatalogError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));
        assert!(!state.is_loading());
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(state.error(), Some("Fetch FAILED!"));
        assert!(state.products().is_empty());
        assert!(state.loaded_at().is_none());
    }

    #[test]
    fn test_begin_load_only_once() {
        let mut state = CatalogState::default();
        assert!(state.begin_load());
        assert!(!state.begin_load());
        state.complete_load(Ok(vec![bike(1, 10)]));
        assert!(!state.begin_load());
        assert_eq!(state.status(), LoadStatus::Ready);
    }

    #[test]
    fn test_find_product() {
        let mut state = CatalogState::default();
        state.begin_load();
        state.complete_load(Ok(vec![bike(1, 10), bike(2, 20)]));
        assert_eq!(state.find(ProductId::new(2)).unwrap().title, "Bike 2");
        assert!(state.find(ProductId::new(3)).is_none());
    }

    /// Source whose fetch blocks until the gate is opened.
    struct GatedSource {
        gate: Arc<tokio::sync::Notify>,
        calls: AtomicUsize,
    }

    impl ProductSource for GatedSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(vec![bike(1, 10)])
        }
    }

    #[tokio::test]
    async fn test_loader_replaces_products_on_success() {
        let loader = CatalogLoader::new(FakeSource::ok(vec![bike(1, 10), bike(2, 20)]));
        assert_eq!(loader.load().await, LoadStatus::Ready);

        let state = loader.state();
        assert_eq!(state.products().len(), 2);
        assert!(state.error().is_none());
        assert!(state.loaded_at().is_some());
    }

    #[tokio::test]
    async fn test_loader_fetches_exactly_once() {
        let loader = CatalogLoader::new(FakeSource::ok(vec![bike(1, 10)]));
        loader.load().await;
        loader.load().await;
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_does_not_retry_after_failure() {
        let loader =
            CatalogLoader::new(FakeSource::failing(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        loader.load().await;
        assert_eq!(loader.load().await, LoadStatus::Failed);
        assert_eq!(loader.state().error(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_overlapping_load_sees_loading_and_skips_fetch() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let loader = CatalogLoader::new(GatedSource {
            gate: Arc::clone(&gate),
            calls: AtomicUsize::new(0),
        });
        let mut rx = loader.subscribe();

        let second = async {
            rx.wait_for(CatalogState::is_loading).await.unwrap();
            let status = loader.load().await;
            gate.notify_one();
            status
        };
        let (first, second) = tokio::join!(loader.load(), second);

        assert_eq!(second, LoadStatus::Loading);
        assert_eq!(first, LoadStatus::Ready);
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
        assert!(!rx.borrow_and_update().is_loading());
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Catalog API returned HTTP 500 Internal Server Error"
        );
    }
}
