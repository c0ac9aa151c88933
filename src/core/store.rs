use crate::{
    contact::{Contact, ContactFields},
    types::ContactId,
};

/// Contacts kept sorted by `(first_name, last_name, email)`, plus the ID allocator.
///
/// Not synchronized. The runtime owns exactly one instance inside its loop task.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl ContactStore {
    /// Empty store whose first insert receives id 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Inserts a contact unless one with identical content already exists.
    ///
    /// Returns the allocated id, or `None` when the insert was deduplicated.
    pub fn insert(&mut self, fields: ContactFields) -> Option<ContactId> {
        if self.find_index_by_content(&fields).is_some() {
            return None;
        }

        let id = self.take_next_id();
        self.contacts.push(fields.into_contact(id));
        self.sort();
        Some(id)
    }

    /// Replaces the content of `id` in place. Returns false when `id` is absent.
    ///
    /// Content uniqueness is not re-checked here; only `insert` deduplicates.
    pub fn update(&mut self, id: ContactId, fields: ContactFields) -> bool {
        let Some(idx) = self.find_index_by_id(id) else {
            return false;
        };
        self.contacts[idx].apply_fields(fields);
        self.sort();
        true
    }

    /// Removes `id`, preserving the order of the remaining contacts.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let idx = self.find_index_by_id(id)?;
        Some(self.contacts.remove(idx))
    }

    /// Contact with `id`, if live.
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.find_index_by_id(id).map(|idx| &self.contacts[idx])
    }

    /// Owned copy of the contact with `id`.
    pub fn get_cloned(&self, id: ContactId) -> Option<Contact> {
        self.get(id).cloned()
    }

    /// Sorted view of all live contacts.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Defensive copy of the sorted sequence.
    pub fn snapshot(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    /// Number of live contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when no contacts are live.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Id the next successful insert will receive.
    pub fn next_id(&self) -> ContactId {
        self.next_id
    }

    fn find_index_by_content(&self, fields: &ContactFields) -> Option<usize> {
        self.contacts
            .binary_search_by(|c| c.cmp_fields(fields))
            .ok()
    }

    fn find_index_by_id(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    fn sort(&mut self) {
        self.contacts.sort_by(Contact::cmp_content);
    }

    fn take_next_id(&mut self) -> ContactId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
