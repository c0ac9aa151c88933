//! Contact domain record and content key types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::ContactId;

/// Fully materialized directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Surrogate identifier assigned on insert.
    pub id: ContactId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, stored verbatim.
    pub email: String,
}

/// Content fields of a contact, without an identifier.
///
/// This is both the add/update payload and the ordering key of the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

impl ContactFields {
    /// Builds a field set from anything string-like.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Materializes a record carrying `id`.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

impl Contact {
    /// Borrowed `(first_name, last_name, email)` ordering key.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.first_name, &self.last_name, &self.email)
    }

    /// Compares two contacts by content only; `id` is ignored.
    pub fn cmp_content(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// Compares this contact's content against a field set.
    pub fn cmp_fields(&self, fields: &ContactFields) -> Ordering {
        self.sort_key().cmp(&(
            fields.first_name.as_str(),
            fields.last_name.as_str(),
            fields.email.as_str(),
        ))
    }

    /// Replaces the three content fields, keeping `id`.
    pub fn apply_fields(&mut self, fields: ContactFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
    }
}
