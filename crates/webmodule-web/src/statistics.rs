//! Dispatch statistics.
//!
//! Counts what the request pipeline did with each request:
//! - redirects issued
//! - static assets served
//! - route handlers run
//! - error pages rendered
//!
//! Counters are atomics so the snapshot can be read without the state lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Collects request pipeline counters.
pub struct DispatchStatistics {
    /// Server start time.
    start_time: Instant,

    requests: AtomicU64,
    redirects: AtomicU64,
    assets: AtomicU64,
    routes: AtomicU64,

    /// Responses rendered from an error page.
    errors: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub requests: u64,
    pub redirects: u64,
    pub assets_served: u64,
    pub routes_handled: u64,
    pub errors: u64,
    /// Seconds since start.
    pub uptime: u64,
}

impl DispatchStatistics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            requests: AtomicU64::new(0),
            redirects: AtomicU64::new(0),
            assets: AtomicU64::new(0),
            routes: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_asset(&self) {
        self.assets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_route(&self) {
        self.routes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            redirects: self.redirects.load(Ordering::Relaxed),
            assets_served: self.assets.load(Ordering::Relaxed),
            routes_handled: self.routes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            uptime: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for DispatchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
