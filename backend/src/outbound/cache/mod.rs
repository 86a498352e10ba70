//! In-process listing revalidation.
//!
//! [`RevalidationRegistry`] keeps one generation counter per route path.
//! Mutations bump the counter for the listing they affect and the listing
//! handler folds the counter into its `ETag`, so any cached copy taken before
//! the mutation stops matching.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::ListingRevalidation;

/// Per-path generation counters.
///
/// Counters start from a per-process random base so validators issued by a
/// previous process never match after a restart.
#[derive(Debug)]
pub struct RevalidationRegistry {
    base: u64,
    generations: Mutex<HashMap<String, u64>>,
}

impl RevalidationRegistry {
    pub fn new() -> Self {
        Self::with_base(Uuid::new_v4().as_u64_pair().0)
    }

    /// Registry whose counters start at `base`.
    pub fn with_base(base: u64) -> Self {
        Self {
            base,
            generations: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for RevalidationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingRevalidation for RevalidationRegistry {
    fn revalidate(&self, path: &str) {
        let Ok(mut generations) = self.generations.lock() else {
            warn!(path, "revalidation registry poisoned; signal dropped");
            return;
        };
        let bumps = generations.entry(path.to_owned()).or_insert(0);
        *bumps = bumps.wrapping_add(1);
        debug!(path, bumps = *bumps, "listing revalidated");
    }

    fn generation(&self, path: &str) -> u64 {
        self.generations
            .lock()
            .map(|generations| generations.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
            .wrapping_add(self.base)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::SALE_LISTING_PATH;
    use rstest::rstest;

    #[rstest]
    fn unknown_paths_start_at_base() {
        let registry = RevalidationRegistry::with_base(40);
        assert_eq!(registry.generation(SALE_LISTING_PATH), 40);
    }

    #[rstest]
    fn fresh_registries_do_not_share_a_base() {
        let first = RevalidationRegistry::new();
        let second = RevalidationRegistry::new();
        assert_ne!(
            first.generation(SALE_LISTING_PATH),
            second.generation(SALE_LISTING_PATH)
        );
    }

    #[rstest]
    fn paths_are_counted_independently() {
        let registry = RevalidationRegistry::with_base(0);
        registry.revalidate(SALE_LISTING_PATH);
        registry.revalidate(SALE_LISTING_PATH);
        registry.revalidate("/other");

        assert_eq!(registry.generation(SALE_LISTING_PATH), 2);
        assert_eq!(registry.generation("/other"), 1);
    }
}
