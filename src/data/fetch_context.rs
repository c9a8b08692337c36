//! Fetch-execution context.
//!
//! The refresh loops never touch the network themselves. They ask a
//! `FetchContext` for a `Promise` and poll it once per frame; the context
//! decides where the request runs. The app builds one `HttpFetchContext` at
//! start-up and passes it in; tests pass a scripted context instead.

use eframe::egui;
use poll_promise::Promise;
use std::future::Future;
use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::FetchError;
use crate::data::coingecko::MarketDataSource;
use crate::domain::{AssetSnapshot, ChartSeries, SeriesKey};

pub type SnapshotResult = Result<Vec<AssetSnapshot>, FetchError>;
pub type SeriesResult = Result<ChartSeries, FetchError>;

pub trait FetchContext {
    /// Starts a `/coins/markets` request for `ids`.
    fn fetch_snapshots(&self, ids: &[&str]) -> Promise<SnapshotResult>;

    /// Starts a `/coins/{id}/market_chart` request for `key`.
    fn fetch_series(&self, key: &SeriesKey) -> Promise<SeriesResult>;
}

/// Runs requests against a `MarketDataSource`: on the tokio runtime natively,
/// on the browser event loop under WASM.
pub struct HttpFetchContext {
    source: Arc<dyn MarketDataSource>,
    #[cfg(not(target_arch = "wasm32"))]
    runtime: tokio::runtime::Handle,
    /// Woken when a request completes so the UI polls without busy-looping
    repaint: Option<egui::Context>,
}

impl HttpFetchContext {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(source: Arc<dyn MarketDataSource>, runtime: tokio::runtime::Handle) -> Self {
        log::info!("Fetch context ready ({})", source.signature());
        Self {
            source,
            runtime,
            repaint: None,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        log::info!("Fetch context ready ({})", source.signature());
        Self {
            source,
            repaint: None,
        }
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn<T, F>(&self, future: F) -> Promise<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (sender, promise) = Promise::new();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            sender.send(future.await);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
        promise
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn<T, F>(&self, future: F) -> Promise<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + 'static,
    {
        let (sender, promise) = Promise::new();
        let repaint = self.repaint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            sender.send(future.await);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
        promise
    }
}

impl FetchContext for HttpFetchContext {
    fn fetch_snapshots(&self, ids: &[&str]) -> Promise<SnapshotResult> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!("[fetch] snapshots for {:?}", ids);
        }
        let source = Arc::clone(&self.source);
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        self.spawn(async move { source.markets(ids).await })
    }

    fn fetch_series(&self, key: &SeriesKey) -> Promise<SeriesResult> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!("[fetch] series {}", key);
        }
        let source = Arc::clone(&self.source);
        let key = key.clone();
        self.spawn(async move { source.market_chart(key).await })
    }
}
