//! Thread-safe keyed store for student records.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::model::Student;

/// In-memory student collection keyed by student id.
///
/// Every operation acquires the lock internally, so the compound
/// check-then-act sequences the handlers rely on (replace, remove)
/// are atomic with respect to concurrent callers.
#[derive(Debug)]
pub struct StudentStore {
    /// Map of student id to record
    students: RwLock<HashMap<String, Student>>,
}

impl StudentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            students: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new empty store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            students: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Inserts a record under its own `id`, overwriting any existing
    /// record with the same key.
    ///
    /// # Arguments
    /// * `student` - Record to store; its `id` field is the key
    ///
    /// # Returns
    /// `Result<Option<Student>, StoreError>` holding the displaced
    /// record if one existed.
    pub fn put(&self, student: Student) -> Result<Option<Student>, StoreError> {
        let mut students = self.students.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.insert(student.id.clone(), student))
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.get(id).cloned())
    }

    /// Returns all records in unspecified order.
    pub fn get_all(&self) -> Result<Vec<Student>, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.values().cloned().collect())
    }

    /// Returns whether a record with the given id exists.
    pub fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.contains_key(id))
    }

    /// Replaces the record stored under an existing id.
    ///
    /// The stored record's `id` field is forced to the key, so a body
    /// that carries a different id cannot re-key the record. Presence
    /// check and overwrite happen under one lock acquisition.
    ///
    /// # Arguments
    /// * `id` - Key of the record to replace
    /// * `student` - Replacement record
    ///
    /// # Returns
    /// `Result<Student, StoreError>` with the record as stored, or
    /// `StudentNotFound` if the id is absent.
    pub fn replace(&self, id: &str, mut student: Student) -> Result<Student, StoreError> {
        let mut students = self.students.write().map_err(|_| StoreError::LockPoisoned)?;
        if !students.contains_key(id) {
            return Err(StoreError::StudentNotFound { id: id.to_string() });
        }
        student.id = id.to_string();
        students.insert(id.to_string(), student.clone());
        Ok(student)
    }

    /// Removes a record by id.
    ///
    /// # Arguments
    /// * `id` - Key of the record to remove
    ///
    /// # Returns
    /// `Result<Student, StoreError>` with the removed record, or
    /// `StudentNotFound` if the id is absent.
    pub fn remove(&self, id: &str) -> Result<Student, StoreError> {
        let mut students = self.students.write().map_err(|_| StoreError::LockPoisoned)?;
        students.remove(id).ok_or_else(|| StoreError::StudentNotFound {
            id: id.to_string(),
        })
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> Result<usize, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.len())
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn student(id: &str, name: &str, age: i64) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            age,
            email: format!("{}@example.com", id),
        }
    }

    #[test]
    fn test_put_then_get() {
        let store = StudentStore::new();
        store.put(student("s1", "Ann", 20)).unwrap();

        let found = store.get("s1").unwrap().unwrap();
        assert_eq!(found.name, "Ann");
        assert_eq!(found.age, 20);
        assert!(store.get("s2").unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites_same_id() {
        let store = StudentStore::new();
        assert!(store.put(student("s1", "Ann", 20)).unwrap().is_none());

        let displaced = store.put(student("s1", "Anna", 21)).unwrap();
        assert_eq!(displaced.unwrap().name, "Ann");
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get("s1").unwrap().unwrap().name, "Anna");
    }

    #[test]
    fn test_get_all_returns_every_record() {
        let store = StudentStore::with_capacity(16);
        store.put(student("s1", "Ann", 20)).unwrap();
        store.put(student("s2", "Ben", 22)).unwrap();

        let mut ids: Vec<String> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_exists() {
        let store = StudentStore::new();
        store.put(student("s1", "Ann", 20)).unwrap();
        assert!(store.exists("s1").unwrap());
        assert!(!store.exists("s2").unwrap());
    }

    #[test]
    fn test_replace_forces_key_over_body_id() {
        let store = StudentStore::new();
        store.put(student("s1", "Ann", 20)).unwrap();

        let replaced = store.replace("s1", student("s9", "Anna", 21)).unwrap();
        assert_eq!(replaced.id, "s1");
        assert_eq!(replaced.name, "Anna");
        // The stray id must not have created a second record
        assert_eq!(store.count().unwrap(), 1);
        assert!(!store.exists("s9").unwrap());
    }

    #[test]
    fn test_replace_missing_id_fails() {
        let store = StudentStore::new();
        let err = store.replace("s1", student("s1", "Ann", 20)).unwrap_err();
        assert_eq!(
            err,
            StoreError::StudentNotFound {
                id: "s1".to_string()
            }
        );
    }

    #[test]
    fn test_remove_returns_record_then_fails() {
        let store = StudentStore::new();
        store.put(student("s1", "Ann", 20)).unwrap();

        let removed = store.remove("s1").unwrap();
        assert_eq!(removed.name, "Ann");
        assert_eq!(store.count().unwrap(), 0);

        let err = store.remove("s1").unwrap_err();
        assert_eq!(
            err,
            StoreError::StudentNotFound {
                id: "s1".to_string()
            }
        );
    }

    #[test]
    fn test_concurrent_puts_keep_one_record_per_id() {
        let store = Arc::new(StudentStore::new());
        let mut handles = Vec::new();

        for worker in 0..8i64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let id = format!("s{}", i % 10);
                    store
                        .put(student(&id, &format!("worker{}", worker), worker))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.count().unwrap(), 10);
    }

    #[test]
    fn test_concurrent_replace_and_remove_never_resurrect() {
        // A replace racing the remove must either land before it (and be
        // removed with the rest) or observe the removal and fail with
        // not-found. It must never re-insert the record.
        let store = Arc::new(StudentStore::new());
        store.put(student("s1", "Ann", 20)).unwrap();

        let replacer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let _ = store.replace("s1", student("s1", "Anna", 21));
                }
            })
        };
        let remover = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.remove("s1"))
        };

        replacer.join().unwrap();
        remover.join().unwrap().unwrap();

        assert!(!store.exists("s1").unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }
}
