//! Single-writer async runtime and event stream APIs.

pub(crate) mod command;
/// Event stream types emitted by the runtime.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
