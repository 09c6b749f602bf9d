//! In-memory progress store

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use super::error::StoreError;
use super::store::{LearnerDirectory, ProgressStore};
use super::types::{Enrollment, EnrollmentKey, Learner};

/// In-memory store for enrollments and learners.
///
/// Each enrollment sits behind its own lock, so writers to different keys
/// proceed independently; the outer maps are locked only to look up or
/// insert entries. A delete that races an update wins: the mutation lands
/// on a record that is no longer in the map.
#[derive(Default)]
pub struct MemoryProgressStore {
    enrollments: RwLock<HashMap<EnrollmentKey, Arc<Mutex<Enrollment>>>>,
    learners: RwLock<HashMap<String, Learner>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &EnrollmentKey) -> Option<Arc<Mutex<Enrollment>>> {
        self.enrollments.read().unwrap().get(key).cloned()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get_or_create(&self, key: &EnrollmentKey) -> Result<Enrollment, StoreError> {
        if let Some(entry) = self.entry(key) {
            return Ok(entry.lock().unwrap().clone());
        }
        let mut map = self.enrollments.write().unwrap();
        let entry = map
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Enrollment::new(key.clone()))));
        let record = entry.lock().unwrap().clone();
        Ok(record)
    }

    fn get(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.entry(key).map(|entry| entry.lock().unwrap().clone()))
    }

    fn update(
        &self,
        key: &EnrollmentKey,
        mutate: &mut dyn FnMut(&mut Enrollment),
    ) -> Result<Enrollment, StoreError> {
        let entry = self
            .entry(key)
            .ok_or_else(|| StoreError::EnrollmentNotFound(key.to_string()))?;
        let mut record = entry.lock().unwrap();
        mutate(&mut record);
        Ok(record.clone())
    }

    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError> {
        Ok(self.enrollments.write().unwrap().remove(key).is_some())
    }

    fn list_for_learner(&self, learner: &str) -> Result<Vec<Enrollment>, StoreError> {
        let map = self.enrollments.read().unwrap();
        let mut records: Vec<Enrollment> = map
            .iter()
            .filter(|(key, _)| key.learner == learner)
            .map(|(_, entry)| entry.lock().unwrap().clone())
            .collect();
        records.sort_by_key(|e| e.course_id);
        Ok(records)
    }
}

impl LearnerDirectory for MemoryProgressStore {
    fn resolve(&self, email: &str, name: &str) -> Result<Learner, StoreError> {
        let mut map = self.learners.write().unwrap();
        let learner = map
            .entry(email.to_string())
            .or_insert_with(|| Learner::new(email, name));
        Ok(learner.clone())
    }

    fn put(&self, learner: Learner) -> Result<(), StoreError> {
        self.learners
            .write()
            .unwrap()
            .insert(learner.email.clone(), learner);
        Ok(())
    }

    fn find(&self, email: &str) -> Result<Option<Learner>, StoreError> {
        Ok(self.learners.read().unwrap().get(email).cloned())
    }

    fn add_points(&self, email: &str, delta: u64) -> Result<u64, StoreError> {
        let mut map = self.learners.write().unwrap();
        let learner = map
            .get_mut(email)
            .ok_or_else(|| StoreError::LearnerNotFound(email.to_string()))?;
        learner.points += delta;
        Ok(learner.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(learner: &str, course_id: i64) -> EnrollmentKey {
        EnrollmentKey::new(learner, course_id)
    }

    #[test]
    fn test_get_or_create_returns_same_record() {
        let store = MemoryProgressStore::new();
        let k = key("alice@example.com", 1);

        let first = store.get_or_create(&k).unwrap();
        let second = store.get_or_create(&k).unwrap();
        assert_eq!(first.enrolled_at, second.enrolled_at);
        assert!(second.completed_modules.is_empty());
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryProgressStore::new();
        assert!(store.get(&key("alice@example.com", 1)).unwrap().is_none());
    }

    #[test]
    fn test_update_mutates_and_returns_record() {
        let store = MemoryProgressStore::new();
        let k = key("alice@example.com", 1);
        store.get_or_create(&k).unwrap();

        let updated = store.update(&k, &mut |e| {
            e.complete("m1");
        })
        .unwrap();
        assert_eq!(updated.completed_modules, vec!["m1"]);
        assert_eq!(updated.last_module_id.as_deref(), Some("m1"));

        let reloaded = store.get(&k).unwrap().unwrap();
        assert_eq!(reloaded.completed_modules, vec!["m1"]);
    }

    #[test]
    fn test_update_missing_fails() {
        let store = MemoryProgressStore::new();
        let err = store
            .update(&key("alice@example.com", 1), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, StoreError::EnrollmentNotFound(_)));
    }

    #[test]
    fn test_delete_reports_presence() {
        let store = MemoryProgressStore::new();
        let k = key("alice@example.com", 1);
        store.get_or_create(&k).unwrap();

        assert!(store.delete(&k).unwrap());
        assert!(!store.delete(&k).unwrap());
        assert!(store.get(&k).unwrap().is_none());
    }

    #[test]
    fn test_list_for_learner_filters_and_sorts() {
        let store = MemoryProgressStore::new();
        store.get_or_create(&key("alice@example.com", 3)).unwrap();
        store.get_or_create(&key("alice@example.com", 1)).unwrap();
        store.get_or_create(&key("bob@example.com", 2)).unwrap();

        let records = store.list_for_learner("alice@example.com").unwrap();
        let ids: Vec<i64> = records.iter().map(|e| e.course_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_resolve_creates_once() {
        let store = MemoryProgressStore::new();
        let first = store.resolve("alice@example.com", "Alice").unwrap();
        assert_eq!(first.name, "Alice");

        // Second resolve keeps the original name
        let second = store.resolve("alice@example.com", "Someone Else").unwrap();
        assert_eq!(second.name, "Alice");
    }

    #[test]
    fn test_add_points_accumulates() {
        let store = MemoryProgressStore::new();
        store.resolve("alice@example.com", "Alice").unwrap();

        assert_eq!(store.add_points("alice@example.com", 5).unwrap(), 5);
        assert_eq!(store.add_points("alice@example.com", 10).unwrap(), 15);
        assert_eq!(store.find("alice@example.com").unwrap().unwrap().points, 15);
    }

    #[test]
    fn test_add_points_missing_learner_fails() {
        let store = MemoryProgressStore::new();
        let err = store.add_points("ghost@example.com", 5).unwrap_err();
        assert!(matches!(err, StoreError::LearnerNotFound(_)));
    }

    #[test]
    fn test_put_replaces_record() {
        let store = MemoryProgressStore::new();
        store.resolve("alice@example.com", "Alice").unwrap();

        let mut learner = Learner::new("alice@example.com", "Alice B.");
        learner.badges = vec!["starter".into()];
        store.put(learner).unwrap();

        let loaded = store.find("alice@example.com").unwrap().unwrap();
        assert_eq!(loaded.name, "Alice B.");
        assert_eq!(loaded.badges, vec!["starter"]);
    }
}
