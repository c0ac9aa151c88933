//! Shared primitive IDs.

/// Monotonic contact identifier. Starts at 1 and is never reused.
pub type ContactId = u64;
