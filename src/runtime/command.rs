//! Messages accepted by the runtime loop.

use tokio::sync::oneshot;

use crate::{
    contact::{Contact, ContactFields},
    types::ContactId,
};

/// One request to the loop. Consumed exactly once.
///
/// Mutations are fire-and-forget; queries carry a oneshot reply. `Details` drops its
/// reply without sending when the id is absent.
#[derive(Debug)]
pub(crate) enum Command {
    Add {
        fields: ContactFields,
    },
    List {
        resp: oneshot::Sender<Vec<Contact>>,
    },
    Details {
        id: ContactId,
        resp: oneshot::Sender<Contact>,
    },
    Delete {
        id: ContactId,
    },
    Update {
        id: ContactId,
        fields: ContactFields,
    },
}

impl Command {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Details { .. } => "details",
            Self::Delete { .. } => "delete",
            Self::Update { .. } => "update",
        }
    }
}
