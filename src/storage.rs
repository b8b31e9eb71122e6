use crate::course::GradeTable;
use seed::prelude::{LocalStorage, WebStorage};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

pub const STORAGE_KEY: &str = "cgpaCourses";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode courses: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("saved courses are unreadable: {0}")]
    Corrupt(serde_json::Error),
}

/// String key-value store the calculator saves its courses into.
pub trait PersistenceAdapter {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
}

impl<S: PersistenceAdapter + ?Sized> PersistenceAdapter for &S {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }
}

// ------ LocalStore ------

/// The browser's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        LocalStorage::storage().map_err(|err| StorageError::Unavailable(format!("{:?}", err)))
    }
}

impl PersistenceAdapter for LocalStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_owned(),
                reason: format!("{:?}", err),
            })
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read {
                key: key.to_owned(),
                reason: format!("{:?}", err),
            })
    }
}

// ------ MemoryStore ------

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }
}

// ------ GradeTable persistence ------

pub fn save_table(store: &impl PersistenceAdapter, table: &GradeTable) -> Result<(), StorageError> {
    store.save(STORAGE_KEY, &table.to_json()?)
}

/// `Ok(None)` when nothing has been saved yet.
pub fn load_table(store: &impl PersistenceAdapter) -> Result<Option<GradeTable>, RestoreError> {
    match store.load(STORAGE_KEY)? {
        Some(json) => GradeTable::from_json(&json)
            .map(Some)
            .map_err(RestoreError::Corrupt),
        None => Ok(None),
    }
}

/// Saved table, or the default one. A saved value that cannot be read is
/// passed to `on_error` and otherwise ignored.
pub fn restore_table(
    store: &impl PersistenceAdapter,
    on_error: impl FnOnce(&RestoreError),
) -> GradeTable {
    match load_table(store) {
        Ok(Some(table)) => table,
        Ok(None) => GradeTable::defaults(),
        Err(err) => {
            on_error(&err);
            GradeTable::defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseId, CourseUpdate};

    struct BrokenStore;

    impl PersistenceAdapter for BrokenStore {
        fn save(&self, key: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_owned(),
                reason: "quota exceeded".into(),
            })
        }

        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_owned(),
                reason: "denied".into(),
            })
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let mut table = GradeTable::defaults();
        let id = table.add();
        table.update(&id, CourseUpdate::Grade("A".into()));

        save_table(&store, &table).unwrap();
        assert!(store.get(STORAGE_KEY).unwrap().contains("\"creditHours\":3"));
        assert_eq!(load_table(&store).unwrap(), Some(table));
    }

    #[test]
    fn load_from_empty_store_is_none() {
        assert_eq!(load_table(&MemoryStore::new()).unwrap(), None);
    }

    #[test]
    fn restore_reads_previously_saved_courses() {
        let store = MemoryStore::with_entry(
            STORAGE_KEY,
            r#"[{"id":"1","name":"Maths","grade":"O","creditHours":4}]"#,
        );
        let table = restore_table(&store, |err| panic!("unexpected error: {}", err));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&CourseId::from("1")).unwrap().name, "Maths");
    }

    #[test]
    fn restore_keeps_courses_with_repeated_ids_and_negative_hours() {
        let store = MemoryStore::with_entry(
            STORAGE_KEY,
            r#"[{"id":"2","name":"Maths","grade":"O","creditHours":4},
                {"id":"2","name":"Course 2","grade":"A","creditHours":3},
                {"id":"3","name":"Lab","grade":"B","creditHours":-2}]"#,
        );
        let table = restore_table(&store, |err| panic!("unexpected error: {}", err));

        let names: Vec<_> = table.courses().map(|course| course.name.as_str()).collect();
        assert_eq!(names, ["Maths", "Course 2", "Lab"]);
        assert_eq!(table.get(&CourseId::from("3")).unwrap().credit_hours, 0);
        assert_eq!(crate::cgpa::compute(&table), Some(64.0 / 7.0));
    }

    #[test]
    fn restore_without_saved_state_uses_defaults_silently() {
        let table = restore_table(&MemoryStore::new(), |err| panic!("unexpected error: {}", err));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn restore_discards_corrupt_state() {
        for corrupt in &["{", "[]", "null", r#"[{"id":"1"}]"#] {
            let store = MemoryStore::with_entry(STORAGE_KEY, corrupt);
            let mut reported = None;
            let table = restore_table(&store, |err| reported = Some(err.to_string()));

            assert_eq!(table.len(), 2, "input {:?}", corrupt);
            assert!(table.courses().all(|course| course.grade.is_empty()));
            assert!(reported.unwrap().starts_with("saved courses are unreadable"));
        }
    }

    #[test]
    fn restore_survives_unreadable_store() {
        let mut reported = None;
        let table = restore_table(&BrokenStore, |err| reported = Some(err.to_string()));
        assert_eq!(table.len(), 2);
        assert_eq!(reported.unwrap(), "failed to read `cgpaCourses`: denied");
    }

    #[test]
    fn save_reports_store_failure() {
        let err = save_table(&BrokenStore, &GradeTable::defaults()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
