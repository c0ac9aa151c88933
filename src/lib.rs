//! In-memory contact directory behind a single-writer async runtime, with an HTTP front end.
//!
//! # Examples
//!
//! Direct use of [`core::store::ContactStore`]:
//! ```
//! use contactbook::{contact::ContactFields, core::store::ContactStore};
//!
//! let mut store = ContactStore::new();
//! assert_eq!(store.insert(ContactFields::new("Bob", "Smith", "bob@x.com")), Some(1));
//! assert_eq!(store.insert(ContactFields::new("Alice", "Jones", "alice@x.com")), Some(2));
//! assert_eq!(store.contacts()[0].first_name, "Alice");
//! ```
//!
//! Shared runtime handle:
//! ```
//! use contactbook::runtime::handle::spawn_contactbook;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let book = spawn_contactbook(100);
//! book.add_contact("Bob", "Smith", "bob@x.com").await.expect("add");
//! let contacts = book.get_contacts().await.expect("list");
//! assert_eq!(contacts[0].id, 1);
//! book.stop();
//! book.wait().await;
//! # }
//! ```
#![warn(missing_docs)]

/// Server bind configuration.
pub mod config;
/// Contact records and ordering keys.
pub mod contact;
/// Core in-memory store.
pub mod core;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types.
pub mod types;
/// HTTP routes and server.
pub mod web;
