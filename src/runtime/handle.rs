use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::{
    contact::{Contact, ContactFields},
    core::store::ContactStore,
    types::ContactId,
};

use super::{command::Command, events::ContactEvent};

/// Smallest command queue the runtime will allocate.
pub const MIN_QUEUE_CAPACITY: usize = 10;
/// Queue size used by the server binary.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

const EVENT_CAPACITY: usize = 1024;

/// Failures surfaced to facade callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// `contact_details` found no contact with this id.
    #[error("contact {0} not found")]
    NotFound(ContactId),
    /// The command intake was closed by [`ContactBookHandle::stop`].
    #[error("contact book has been stopped")]
    Shutdown,
}

/// Runtime tuning knobs.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bounded command queue size; floored to [`MIN_QUEUE_CAPACITY`].
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Lifecycle of the loop task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Accepting and processing commands.
    Running,
    /// Intake closed; buffered commands are still being processed.
    Draining,
    /// Loop exited. Terminal.
    Stopped,
}

/// Cloneable facade over the single-writer contact loop.
///
/// All clones share one intake; [`stop`](Self::stop) on any clone closes it for all.
#[derive(Clone)]
pub struct ContactBookHandle {
    cmd_tx: Arc<Mutex<Option<mpsc::Sender<Command>>>>,
    state_tx: Arc<watch::Sender<ActorState>>,
    events_tx: broadcast::Sender<ContactEvent>,
}

/// Spawns the loop on the current tokio runtime with an empty store.
///
/// `queue_capacity` below [`MIN_QUEUE_CAPACITY`] is raised to it.
pub fn spawn_contactbook(queue_capacity: usize) -> ContactBookHandle {
    spawn_with_config(ContactStore::new(), RuntimeConfig { queue_capacity })
}

/// Spawns the loop owning `store`.
pub fn spawn_with_config(store: ContactStore, config: RuntimeConfig) -> ContactBookHandle {
    let capacity = config.queue_capacity.max(MIN_QUEUE_CAPACITY);
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(capacity);
    let (events_tx, _) = broadcast::channel::<ContactEvent>(EVENT_CAPACITY);
    let state_tx = Arc::new(watch::Sender::new(ActorState::Running));

    let events_tx_loop = events_tx.clone();
    let state_tx_loop = Arc::clone(&state_tx);

    tokio::spawn(async move {
        info!(capacity, "contact book started");
        let mut store = store;

        while let Some(cmd) = cmd_rx.recv().await {
            handle_command(cmd, &mut store, &events_tx_loop);
        }

        state_tx_loop.send_replace(ActorState::Stopped);
        info!(contacts = store.len(), "contact book stopped");
    });

    ContactBookHandle {
        cmd_tx: Arc::new(Mutex::new(Some(cmd_tx))),
        state_tx,
        events_tx,
    }
}

impl ContactBookHandle {
    /// Receives [`ContactEvent`]s for mutations processed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ContactEvent> {
        self.events_tx.subscribe()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ActorState {
        *self.state_tx.borrow()
    }

    /// Queues an insert. Exact duplicates of an existing contact are dropped by the loop.
    pub async fn add_contact(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), RuntimeError> {
        let fields = ContactFields::new(first_name, last_name, email);
        self.submit(Command::Add { fields }).await
    }

    /// Returns all contacts ordered by first name, last name, then email.
    pub async fn get_contacts(&self) -> Result<Vec<Contact>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::List { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::Shutdown)
    }

    /// Looks up one contact.
    ///
    /// The loop closes the reply without a value when `id` is absent, which maps to
    /// [`RuntimeError::NotFound`].
    pub async fn contact_details(&self, id: ContactId) -> Result<Contact, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.submit(Command::Details { id, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::NotFound(id))
    }

    /// Queues a removal. A missing id is a silent no-op.
    pub async fn delete_contact(&self, id: ContactId) -> Result<(), RuntimeError> {
        self.submit(Command::Delete { id }).await
    }

    /// Queues a field replacement. A missing id is a silent no-op.
    pub async fn update_contact(
        &self,
        id: ContactId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), RuntimeError> {
        let fields = ContactFields::new(first_name, last_name, email);
        self.submit(Command::Update { id, fields }).await
    }

    /// Closes the command intake. Already queued commands still run.
    ///
    /// Returns immediately; use [`wait`](Self::wait) to observe the drain. Calling it
    /// again is harmless.
    pub fn stop(&self) {
        let changed = self.state_tx.send_if_modified(|state| {
            if *state == ActorState::Running {
                *state = ActorState::Draining;
                true
            } else {
                false
            }
        });
        self.cmd_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if changed {
            info!("contact book intake closed, draining");
        }
    }

    /// Resolves once the loop has processed every queued command and exited.
    pub async fn wait(&self) {
        let mut rx = self.state_tx.subscribe();
        let _ = rx.wait_for(|state| *state == ActorState::Stopped).await;
    }

    async fn submit(&self, cmd: Command) -> Result<(), RuntimeError> {
        let tx = self
            .cmd_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(RuntimeError::Shutdown)?;
        tx.send(cmd).await.map_err(|_| RuntimeError::Shutdown)
    }
}

fn handle_command(
    cmd: Command,
    store: &mut ContactStore,
    events_tx: &broadcast::Sender<ContactEvent>,
) {
    debug!(op = cmd.name(), "processing command");
    match cmd {
        Command::Add { fields } => match store.insert(fields) {
            Some(id) => {
                debug!(id, "contact added");
                let _ = events_tx.send(ContactEvent::Added { id });
            }
            None => debug!("duplicate contact ignored"),
        },
        Command::List { resp } => {
            let _ = resp.send(store.snapshot());
        }
        Command::Details { id, resp } => {
            // Dropping `resp` unsent is the not-found signal.
            if let Some(contact) = store.get_cloned(id) {
                let _ = resp.send(contact);
            }
        }
        Command::Delete { id } => {
            if store.remove(id).is_some() {
                debug!(id, "contact deleted");
                let _ = events_tx.send(ContactEvent::Deleted { id });
            }
        }
        Command::Update { id, fields } => {
            if store.update(id, fields) {
                debug!(id, "contact updated");
                let _ = events_tx.send(ContactEvent::Updated { id });
            }
        }
    }
}
