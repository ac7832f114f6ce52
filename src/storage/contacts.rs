//! Contact repository for JSON storage
//!
//! Several sessions may share one contacts.json. Every mutation takes an
//! exclusive lock on the sibling `contacts.lock`, re-reads the file, checks
//! uniqueness against that fresh copy and writes it back atomically. The
//! in-memory index is swapped only after the write succeeds, so a failed
//! mutation leaves both copies untouched. Reads reload the file first.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fs4::fs_std::FileExt;
use tracing::debug;

use crate::error::ContactBookError;
use crate::models::{Contact, ContactId, Owner};

use super::file_io::{read_json, write_json_atomic};

/// Serializable contact data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ContactData {
    pub contacts: Vec<Contact>,
}

/// Uniqueness key: owner scope plus normalized name
type NameKey = (Option<Owner>, String);

fn name_key(owner: Option<&Owner>, name: &str) -> NameKey {
    (owner.cloned(), Contact::normalize_name(name))
}

#[derive(Default)]
struct ContactIndex {
    by_id: HashMap<ContactId, Contact>,
    by_name: HashMap<NameKey, ContactId>,
}

impl ContactIndex {
    fn from_contacts(contacts: Vec<Contact>) -> Self {
        let mut index = Self::default();
        for contact in contacts {
            index.insert(contact);
        }
        index
    }

    fn insert(&mut self, contact: Contact) {
        self.by_name
            .insert(name_key(contact.owner.as_ref(), &contact.name), contact.id);
        self.by_id.insert(contact.id, contact);
    }

    fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let contact = self.by_id.remove(&id)?;
        self.by_name
            .remove(&name_key(contact.owner.as_ref(), &contact.name));
        Some(contact)
    }

    /// ID of the contact holding `name` in `owner`'s scope, if any
    fn holder_of(&self, owner: Option<&Owner>, name: &str) -> Option<ContactId> {
        self.by_name.get(&name_key(owner, name)).copied()
    }

    fn sorted(&self, owner: Option<Option<&Owner>>) -> Vec<Contact> {
        let mut contacts: Vec<_> = self
            .by_id
            .values()
            .filter(|c| owner.map_or(true, |o| c.is_owned_by(o)))
            .cloned()
            .collect();
        sort_by_name(&mut contacts);
        contacts
    }
}

/// Order contacts by name, case-insensitively, ties broken by exact name
fn sort_by_name(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Repository for contact persistence
pub struct ContactRepository {
    path: PathBuf,
    lock_path: PathBuf,
    index: RwLock<ContactIndex>,
}

impl ContactRepository {
    /// Create a new contact repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            lock_path: path.with_extension("lock"),
            path,
            index: RwLock::new(ContactIndex::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ContactIndex>, ContactBookError> {
        self.index.read().map_err(|e| {
            ContactBookError::Storage(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ContactIndex>, ContactBookError> {
        self.index.write().map_err(|e| {
            ContactBookError::Storage(format!("Failed to acquire write lock: {}", e))
        })
    }

    fn read_from_disk(&self) -> Result<ContactIndex, ContactBookError> {
        let file_data: ContactData = read_json(&self.path)?;
        Ok(ContactIndex::from_contacts(file_data.contacts))
    }

    /// Load contacts from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), ContactBookError> {
        let fresh = self.read_from_disk()?;
        let mut index = self.write()?;
        *index = fresh;

        debug!(path = %self.path.display(), count = index.by_id.len(), "loaded contacts");
        Ok(())
    }

    /// Reload from disk and hand out a read guard over the result
    fn current(&self) -> Result<RwLockReadGuard<'_, ContactIndex>, ContactBookError> {
        self.load()?;
        self.read()
    }

    /// Open the lock file and block until this handle holds it exclusively
    ///
    /// The lock is released when the returned handle is dropped.
    fn lock_file(&self) -> Result<File, ContactBookError> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| {
                ContactBookError::Storage(format!(
                    "Failed to open {}: {}",
                    self.lock_path.display(),
                    e
                ))
            })?;

        file.lock_exclusive().map_err(|e| {
            ContactBookError::Storage(format!("Failed to lock contacts file: {}", e))
        })?;
        Ok(file)
    }

    /// Run `change` against a fresh copy of the file and persist the result
    fn mutate<T, F>(&self, change: F) -> Result<T, ContactBookError>
    where
        F: FnOnce(&mut ContactIndex) -> Result<T, ContactBookError>,
    {
        let mut index = self.write()?;
        let _lock = self.lock_file()?;

        let mut fresh = self.read_from_disk()?;
        let result = change(&mut fresh)?;
        self.persist(&fresh)?;

        *index = fresh;
        Ok(result)
    }

    fn persist(&self, index: &ContactIndex) -> Result<(), ContactBookError> {
        let file_data = ContactData {
            contacts: index.sorted(None),
        };
        write_json_atomic(&self.path, &file_data)?;
        debug!(path = %self.path.display(), count = file_data.contacts.len(), "saved contacts");
        Ok(())
    }

    /// Get a contact by ID, regardless of owner
    pub fn get(&self, id: ContactId) -> Result<Option<Contact>, ContactBookError> {
        Ok(self.current()?.by_id.get(&id).cloned())
    }

    /// Get the contacts in one owner scope, sorted by name
    pub fn get_for_owner(&self, owner: Option<&Owner>) -> Result<Vec<Contact>, ContactBookError> {
        Ok(self.current()?.sorted(Some(owner)))
    }

    /// Get a contact by exact name (case-insensitive) within an owner scope
    pub fn get_by_name(
        &self,
        owner: Option<&Owner>,
        name: &str,
    ) -> Result<Option<Contact>, ContactBookError> {
        let index = self.current()?;
        Ok(index
            .holder_of(owner, name)
            .and_then(|id| index.by_id.get(&id).cloned()))
    }

    /// Insert a new contact and persist
    ///
    /// Fails with `Duplicate` if the owner already has a contact with the same
    /// name ignoring case.
    pub fn insert(&self, contact: Contact) -> Result<(), ContactBookError> {
        self.mutate(|index| {
            if index.holder_of(contact.owner.as_ref(), &contact.name).is_some() {
                return Err(ContactBookError::duplicate_contact(&contact.name));
            }
            index.insert(contact);
            Ok(())
        })
    }

    /// Modify a stored contact and persist, returning the new version
    ///
    /// `change` sees the record as currently stored on disk. The resulting
    /// name may collide only with the contact being modified.
    pub fn update_with<F>(&self, id: ContactId, change: F) -> Result<Contact, ContactBookError>
    where
        F: FnOnce(&mut Contact) -> Result<(), ContactBookError>,
    {
        self.mutate(|index| {
            let mut contact = index
                .remove(id)
                .ok_or_else(|| ContactBookError::contact_not_found(id.to_string()))?;

            change(&mut contact)?;

            if index.holder_of(contact.owner.as_ref(), &contact.name).is_some() {
                return Err(ContactBookError::duplicate_contact(&contact.name));
            }
            index.insert(contact.clone());
            Ok(contact)
        })
    }

    /// Remove a contact and persist, returning it if it existed
    pub fn remove(&self, id: ContactId) -> Result<Option<Contact>, ContactBookError> {
        self.mutate(|index| Ok(index.remove(id)))
    }

    /// Count contacts in an owner scope
    pub fn count(&self, owner: Option<&Owner>) -> Result<usize, ContactBookError> {
        Ok(self
            .current()?
            .by_id
            .values()
            .filter(|c| c.is_owned_by(owner))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::thread;
    use tempfile::TempDir;

    fn open_repo(path: &Path) -> ContactRepository {
        let repo = ContactRepository::new(path.to_path_buf());
        repo.load().unwrap();
        repo
    }

    fn create_test_repo() -> (TempDir, ContactRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repo(&temp_dir.path().join("contacts.json"));
        (temp_dir, repo)
    }

    fn names(repo: &ContactRepository, owner: Option<&Owner>) -> Vec<String> {
        repo.get_for_owner(owner)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count(None).unwrap(), 0);
        assert!(repo.get_for_owner(None).unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let contact = Contact::new(None, "Alice");
        let id = contact.id;
        repo.insert(contact).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn test_insert_rejects_duplicate_in_same_scope() {
        let (_temp_dir, repo) = create_test_repo();
        let owner = Owner::from(1_u64);

        repo.insert(Contact::new(Some(owner.clone()), "Alice")).unwrap();
        let err = repo
            .insert(Contact::new(Some(owner.clone()), "ALICE"))
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.count(Some(&owner)).unwrap(), 1);
    }

    #[test]
    fn test_same_name_different_owners() {
        let (_temp_dir, repo) = create_test_repo();

        repo.insert(Contact::new(Some(Owner::from(1_u64)), "Bob")).unwrap();
        repo.insert(Contact::new(Some(Owner::from(2_u64)), "Bob")).unwrap();
        repo.insert(Contact::new(None, "Bob")).unwrap();

        assert_eq!(repo.count(Some(&Owner::from(1_u64))).unwrap(), 1);
        assert_eq!(repo.count(Some(&Owner::from(2_u64))).unwrap(), 1);
        assert_eq!(repo.count(None).unwrap(), 1);
    }

    #[test]
    fn test_get_by_name_is_scoped() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Contact::new(Some(Owner::from(1_u64)), "Grace Hopper"))
            .unwrap();

        assert!(repo
            .get_by_name(Some(&Owner::from(1_u64)), "grace hopper")
            .unwrap()
            .is_some());
        assert!(repo
            .get_by_name(Some(&Owner::from(2_u64)), "grace hopper")
            .unwrap()
            .is_none());
        assert!(repo.get_by_name(None, "grace hopper").unwrap().is_none());
    }

    #[test]
    fn test_update_allows_recasing_own_name() {
        let (_temp_dir, repo) = create_test_repo();
        let contact = Contact::new(None, "alice");
        let id = contact.id;
        repo.insert(contact).unwrap();

        let updated = repo
            .update_with(id, |c| {
                c.name = "Alice".into();
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(repo.get(id).unwrap().unwrap().name, "Alice");
        assert!(repo.get_by_name(None, "ALICE").unwrap().is_some());
    }

    #[test]
    fn test_update_rejects_collision_and_keeps_index() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Contact::new(None, "Alice")).unwrap();
        let bob = Contact::new(None, "Bob");
        let bob_id = bob.id;
        repo.insert(bob).unwrap();

        let err = repo
            .update_with(bob_id, |c| {
                c.name = "alice".into();
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_duplicate());

        assert_eq!(repo.get(bob_id).unwrap().unwrap().name, "Bob");
        assert!(repo.get_by_name(None, "bob").unwrap().is_some());
    }

    #[test]
    fn test_failed_change_leaves_file_untouched() {
        let (temp_dir, repo) = create_test_repo();
        let contact = Contact::new(None, "Alice").with_details("555", "", "");
        let id = contact.id;
        repo.insert(contact).unwrap();

        let err = repo
            .update_with(id, |c| {
                c.phone = "999".into();
                Err(ContactBookError::Validation("rejected".into()))
            })
            .unwrap_err();
        assert!(err.is_validation());

        let reopened = open_repo(&temp_dir.path().join("contacts.json"));
        assert_eq!(reopened.get(id).unwrap().unwrap().phone, "555");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.update_with(ContactId::new(), |_| Ok(())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_clears_name_index() {
        let (_temp_dir, repo) = create_test_repo();
        let contact = Contact::new(None, "Test");
        let id = contact.id;
        repo.insert(contact).unwrap();

        assert!(repo.remove(id).unwrap().is_some());
        assert!(repo.remove(id).unwrap().is_none());
        assert!(repo.get_by_name(None, "test").unwrap().is_none());

        // Name is free again
        repo.insert(Contact::new(None, "TEST")).unwrap();
    }

    #[test]
    fn test_mutations_persist_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let contact = Contact::new(Some(Owner::from("alice")), "Carol")
            .with_details("555", "c@example.com", "Somewhere");
        let id = contact.id;
        repo.insert(contact).unwrap();

        let repo2 = open_repo(&temp_dir.path().join("contacts.json"));

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.email, "c@example.com");
        assert_eq!(loaded.owner, Some(Owner::from("alice")));
    }

    #[test]
    fn test_sorted_case_insensitively() {
        let (_temp_dir, repo) = create_test_repo();
        for name in ["charlie", "Bravo", "alpha"] {
            repo.insert(Contact::new(None, name)).unwrap();
        }

        assert_eq!(names(&repo, None), vec!["alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn test_two_handles_keep_each_others_inserts() {
        let (temp_dir, first) = create_test_repo();
        let second = open_repo(&temp_dir.path().join("contacts.json"));

        second.insert(Contact::new(None, "Bob")).unwrap();
        first.insert(Contact::new(None, "Alice")).unwrap();

        let reopened = open_repo(&temp_dir.path().join("contacts.json"));
        assert_eq!(names(&reopened, None), vec!["Alice", "Bob"]);
        assert_eq!(names(&first, None), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_duplicate_checked_against_other_handle() {
        let (temp_dir, first) = create_test_repo();
        let second = open_repo(&temp_dir.path().join("contacts.json"));

        second.insert(Contact::new(None, "Alice")).unwrap();
        let err = first.insert(Contact::new(None, "ALICE")).unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(first.count(None).unwrap(), 1);
    }

    #[test]
    fn test_reads_see_other_handles_changes() {
        let (temp_dir, first) = create_test_repo();
        let second = open_repo(&temp_dir.path().join("contacts.json"));
        let contact = Contact::new(None, "Alice");
        let id = contact.id;
        first.insert(contact).unwrap();

        second
            .update_with(id, |c| {
                c.email = "a@x.com".into();
                Ok(())
            })
            .unwrap();

        assert_eq!(first.get(id).unwrap().unwrap().email, "a@x.com");
        second.remove(id).unwrap();
        assert!(first.get_by_name(None, "alice").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_handles_on_threads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                thread::spawn(move || {
                    let repo = open_repo(&path);
                    repo.insert(Contact::new(None, format!("Contact {}", i)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(open_repo(&path).count(None).unwrap(), 8);
    }
}
