//! Driven port signalling that a cached listing is stale.
//!
//! Mutations call [`ListingRevalidation::revalidate`] with the listing path
//! after they succeed. Readers compare [`ListingRevalidation::generation`]
//! against what they served before to decide whether a cached copy is still
//! fresh.

use std::sync::atomic::{AtomicU64, Ordering};

/// Path of the sales listing page.
pub const SALE_LISTING_PATH: &str = "/sale";

/// Invalidation signal keyed by route path.
#[cfg_attr(test, mockall::automock)]
pub trait ListingRevalidation: Send + Sync {
    /// Mark the listing at `path` as stale.
    fn revalidate(&self, path: &str);

    /// Monotonic counter bumped by every [`Self::revalidate`] for `path`.
    fn generation(&self, path: &str) -> u64;
}

/// Single-counter revalidation shared by every path.
///
/// Useful for tests that only need to observe that a signal fired.
#[derive(Debug, Default)]
pub struct FixtureListingRevalidation {
    counter: AtomicU64,
}

impl ListingRevalidation for FixtureListingRevalidation {
    fn revalidate(&self, _path: &str) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }

    fn generation(&self, _path: &str) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
