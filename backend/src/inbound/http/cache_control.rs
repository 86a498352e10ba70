//! Cache policies for HTTP responses.

/// Private responses must be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Mutation responses and health checks are never stored.
pub const NO_STORE: &str = "no-store";
