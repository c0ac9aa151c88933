//! In-memory authoritative store.

/// Ordered contact store and ID allocator.
pub mod store;
