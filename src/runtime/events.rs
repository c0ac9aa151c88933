//! Runtime event stream payloads.

use crate::types::ContactId;

/// Events emitted from the single-writer loop after a mutation took effect.
///
/// Deduplicated adds and updates/deletes of missing ids emit nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    /// A new contact was inserted.
    Added {
        /// Allocated contact id.
        id: ContactId,
    },
    /// An existing contact had its fields replaced.
    Updated {
        /// Updated contact id.
        id: ContactId,
    },
    /// A contact was removed.
    Deleted {
        /// Removed contact id.
        id: ContactId,
    },
}
