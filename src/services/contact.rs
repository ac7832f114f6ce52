//! Contact service
//!
//! Business logic for contact management: validation, per-owner name
//! uniqueness, partial updates and search. Every mutation is persisted by the
//! repository before the call returns.

use tracing::info;

use crate::error::{ContactBookError, ContactBookResult};
use crate::models::{Contact, ContactId, ContactUpdate, Owner};
use crate::storage::Storage;

/// Shortest ID prefix accepted, matching the form shown in contact tables
const SHORT_ID_LEN: usize = 8;

/// Input for creating a new contact
#[derive(Debug, Clone, Default)]
pub struct CreateContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CreateContactInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_details(
        mut self,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self.address = address.into();
        self
    }
}

/// Service for contact management
pub struct ContactService<'a> {
    storage: &'a Storage,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new contact in the owner's scope
    pub fn create(
        &self,
        owner: Option<&Owner>,
        input: CreateContactInput,
    ) -> ContactBookResult<Contact> {
        let contact = Contact::new(owner.cloned(), input.name).with_details(
            input.phone,
            input.email,
            input.address,
        );

        contact
            .validate()
            .map_err(|e| ContactBookError::Validation(e.to_string()))?;

        self.storage.contacts.insert(contact.clone())?;

        info!(
            owner = owner.map(Owner::as_str),
            contact = %contact.id,
            name = %contact.name,
            "contact created"
        );
        Ok(contact)
    }

    /// List the owner's contacts by name, optionally filtered
    ///
    /// A non-blank query keeps contacts whose name, phone, email or address
    /// contains it, ignoring case.
    pub fn list(&self, owner: Option<&Owner>, query: Option<&str>) -> ContactBookResult<Vec<Contact>> {
        let contacts = self.storage.contacts.get_for_owner(owner)?;

        let needle = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return Ok(contacts),
        };

        Ok(contacts
            .into_iter()
            .filter(|c| c.matches_query(&needle))
            .collect())
    }

    /// Get a contact by ID within the owner's scope
    pub fn get(&self, owner: Option<&Owner>, id: ContactId) -> ContactBookResult<Contact> {
        self.storage
            .contacts
            .get(id)?
            .filter(|c| c.is_owned_by(owner))
            .ok_or_else(|| ContactBookError::contact_not_found(id.to_string()))
    }

    /// Exact, case-insensitive name lookup
    pub fn search_by_name(
        &self,
        owner: Option<&Owner>,
        name: &str,
    ) -> ContactBookResult<Option<Contact>> {
        self.storage.contacts.get_by_name(owner, name)
    }

    /// Resolve a contact by exact name first, then by ID
    ///
    /// The ID may be the full form or the short `con-xxxxxxxx` form shown in
    /// contact tables. A short form shared by several contacts is rejected.
    pub fn find(&self, owner: Option<&Owner>, identifier: &str) -> ContactBookResult<Option<Contact>> {
        if let Some(contact) = self.search_by_name(owner, identifier)? {
            return Ok(Some(contact));
        }

        if let Ok(id) = identifier.parse::<ContactId>() {
            return match self.get(owner, id) {
                Ok(contact) => Ok(Some(contact)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            };
        }

        self.find_by_short_id(owner, identifier)
    }

    fn find_by_short_id(
        &self,
        owner: Option<&Owner>,
        identifier: &str,
    ) -> ContactBookResult<Option<Contact>> {
        let needle = identifier.trim().to_lowercase();
        let hex = needle.strip_prefix(ContactId::PREFIX).unwrap_or(&needle);
        if hex.len() < SHORT_ID_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(None);
        }
        let needle = format!("{}{}", ContactId::PREFIX, hex);

        let mut matches = self
            .storage
            .contacts
            .get_for_owner(owner)?
            .into_iter()
            .filter(|c| c.id.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(contact), None) => Ok(Some(contact)),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(ContactBookError::Validation(format!(
                "ID '{}' matches more than one contact",
                identifier.trim()
            ))),
        }
    }

    /// Apply a partial update
    ///
    /// Fields left as `None` keep their current value. A new name is
    /// re-checked for uniqueness against the owner's other contacts.
    pub fn update(
        &self,
        owner: Option<&Owner>,
        id: ContactId,
        update: &ContactUpdate,
    ) -> ContactBookResult<Contact> {
        let before = self.get(owner, id)?;

        let contact = self.storage.contacts.update_with(id, |contact| {
            contact.apply(update);
            contact
                .validate()
                .map_err(|e| ContactBookError::Validation(e.to_string()))
        })?;

        if before.name != contact.name {
            info!(contact = %contact.id, from = %before.name, to = %contact.name, "contact renamed");
        } else {
            info!(contact = %contact.id, name = %contact.name, "contact updated");
        }
        Ok(contact)
    }

    /// Delete a contact, returning the removed record
    pub fn delete(&self, owner: Option<&Owner>, id: ContactId) -> ContactBookResult<Contact> {
        // Scope check first so other owners' contacts read as missing
        self.get(owner, id)?;

        let removed = self
            .storage
            .contacts
            .remove(id)?
            .ok_or_else(|| ContactBookError::contact_not_found(id.to_string()))?;

        info!(contact = %removed.id, name = %removed.name, "contact deleted");
        Ok(removed)
    }

    /// Count the owner's contacts
    pub fn count(&self, owner: Option<&Owner>) -> ContactBookResult<usize> {
        self.storage.contacts.count(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ContactBookPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths).unwrap();
        (temp_dir, storage)
    }

    fn alice() -> CreateContactInput {
        CreateContactInput::new("Alice").with_details("555-1000", "a@x.com", "1 Main St")
    }

    #[test]
    fn test_create_contact() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);
        let owner = Owner::from(1_u64);

        let contact = service.create(Some(&owner), alice()).unwrap();

        assert_eq!(contact.name, "Alice");
        assert_eq!(contact.owner, Some(owner));
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[test]
    fn test_create_requires_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let err = service
            .create(None, CreateContactInput::new("   "))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.count(None).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_name_same_owner() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);
        let owner = Owner::from(1_u64);

        service.create(Some(&owner), alice()).unwrap();
        let err = service
            .create(Some(&owner), CreateContactInput::new("ALICE"))
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(service.count(Some(&owner)).unwrap(), 1);
    }

    #[test]
    fn test_same_name_different_owners() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        service
            .create(Some(&Owner::from(1_u64)), CreateContactInput::new("Bob"))
            .unwrap();
        service
            .create(Some(&Owner::from(2_u64)), CreateContactInput::new("Bob"))
            .unwrap();

        assert_eq!(service.count(Some(&Owner::from(1_u64))).unwrap(), 1);
        assert_eq!(service.count(Some(&Owner::from(2_u64))).unwrap(), 1);
    }

    #[test]
    fn test_list_is_sorted_and_scoped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);
        let owner = Owner::from(1_u64);

        for name in ["Zed", "amy", "Mike"] {
            service
                .create(Some(&owner), CreateContactInput::new(name))
                .unwrap();
        }
        service
            .create(Some(&Owner::from(2_u64)), CreateContactInput::new("Other"))
            .unwrap();

        let names: Vec<_> = service
            .list(Some(&owner), None)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["amy", "Mike", "Zed"]);
    }

    #[test]
    fn test_list_filters_by_phone_substring() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);
        let owner = Owner::from(1_u64);

        service.create(Some(&owner), alice()).unwrap();
        service
            .create(
                Some(&owner),
                CreateContactInput::new("Bob").with_details("555-2000", "", ""),
            )
            .unwrap();
        service
            .create(
                Some(&Owner::from(2_u64)),
                CreateContactInput::new("Eve").with_details("555-1000", "", ""),
            )
            .unwrap();

        let found = service.list(Some(&owner), Some("5-10")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");
    }

    #[test]
    fn test_list_query_is_case_insensitive_across_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        service.create(None, alice()).unwrap();

        assert_eq!(service.list(None, Some("MAIN")).unwrap().len(), 1);
        assert_eq!(service.list(None, Some("X.COM")).unwrap().len(), 1);
        assert_eq!(service.list(None, Some("")).unwrap().len(), 1);
        assert!(service.list(None, Some("nowhere")).unwrap().is_empty());
    }

    #[test]
    fn test_get_other_owners_contact_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(Some(&Owner::from(1_u64)), alice()).unwrap();

        let err = service.get(Some(&Owner::from(2_u64)), contact.id).unwrap_err();
        assert!(err.is_not_found());
        let err = service.delete(Some(&Owner::from(2_u64)), contact.id).unwrap_err();
        assert!(err.is_not_found());
        assert!(service.get(Some(&Owner::from(1_u64)), contact.id).is_ok());
    }

    #[test]
    fn test_update_only_phone() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();
        let updated = service
            .update(None, contact.id, &ContactUpdate::default().phone("555-9999"))
            .unwrap();

        assert_eq!(updated.phone, "555-9999");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.address, "1 Main St");
        assert!(updated.updated_at >= contact.updated_at);
        assert_eq!(updated.created_at, contact.created_at);
    }

    #[test]
    fn test_update_name_collision() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        service.create(None, alice()).unwrap();
        let bob = service.create(None, CreateContactInput::new("Bob")).unwrap();

        let err = service
            .update(None, bob.id, &ContactUpdate::default().name("aLiCe"))
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(service.get(None, bob.id).unwrap().name, "Bob");
    }

    #[test]
    fn test_update_rename_to_own_name_with_new_casing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();
        let updated = service
            .update(None, contact.id, &ContactUpdate::default().name("ALICE"))
            .unwrap();

        assert_eq!(updated.name, "ALICE");
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();
        let err = service
            .update(None, contact.id, &ContactUpdate::default().name(" "))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.get(None, contact.id).unwrap().name, "Alice");
    }

    #[test]
    fn test_update_missing_contact() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let err = service
            .update(None, ContactId::new(), &ContactUpdate::default().phone("1"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();
        let deleted = service.delete(None, contact.id).unwrap();
        assert_eq!(deleted.name, "Alice");

        assert!(service.get(None, contact.id).unwrap_err().is_not_found());
        assert!(service.delete(None, contact.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_by_name_exact() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        service.create(None, alice()).unwrap();

        assert!(service.search_by_name(None, " alice ").unwrap().is_some());
        assert!(service.search_by_name(None, "ali").unwrap().is_none());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();

        assert_eq!(service.find(None, "ALICE").unwrap().unwrap().id, contact.id);
        assert_eq!(
            service
                .find(None, &contact.id.to_string())
                .unwrap()
                .unwrap()
                .id,
            contact.id
        );
        assert!(service.find(None, "nobody").unwrap().is_none());
        assert!(service
            .find(Some(&Owner::from(9_u64)), &contact.id.to_string())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);
        let owner = Owner::from("alice");

        let contact = service.create(Some(&owner), alice()).unwrap();
        let short = contact.id.short();

        let found = service.find(Some(&owner), &short).unwrap().unwrap();
        assert_eq!(found.id, contact.id);
        let found = service
            .find(Some(&owner), &short.to_uppercase())
            .unwrap()
            .unwrap();
        assert_eq!(found.id, contact.id);
        let bare = short.trim_start_matches(ContactId::PREFIX);
        assert_eq!(service.find(Some(&owner), bare).unwrap().unwrap().id, contact.id);

        assert!(service.find(Some(&Owner::from("bob")), &short).unwrap().is_none());
        assert!(service.find(Some(&owner), &short[..short.len() - 1]).unwrap().is_none());
    }

    #[test]
    fn test_ambiguous_short_id_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        for (name, id) in [
            ("Alice", "1234abcd-0000-4000-8000-000000000001"),
            ("Bob", "1234abcd-0000-4000-8000-000000000002"),
        ] {
            let mut contact = Contact::new(None, name);
            contact.id = id.parse().unwrap();
            storage.contacts.insert(contact).unwrap();
        }

        let err = service.find(None, "con-1234abcd").unwrap_err();
        assert!(err.to_string().contains("matches more than one contact"));

        let found = service.find(None, "1234abcd-0000-4000-8000-000000000002").unwrap();
        assert_eq!(found.unwrap().name, "Bob");
    }

    #[test]
    fn test_changes_survive_reload() {
        let (temp_dir, storage) = create_test_storage();
        let service = ContactService::new(&storage);

        let contact = service.create(None, alice()).unwrap();
        service
            .update(None, contact.id, &ContactUpdate::default().email("new@x.com"))
            .unwrap();

        let paths = ContactBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(&paths).unwrap();
        let reloaded = ContactService::new(&reopened).get(None, contact.id).unwrap();
        assert_eq!(reloaded.email, "new@x.com");
    }
}
