//! Nullable store: thread-safe in-memory storage for testing.

use soulbound_store::{
    apply_comparison_by_wallet, upsert_by_wallet, SessionStore, StoreError, StudentStore,
    UpsertOutcome,
};
use soulbound_types::{Confidence, StudentRecord, Timestamp, WalletAddress};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    students: Vec<StudentRecord>,
    active_wallet: Option<WalletAddress>,
    fail_writes: bool,
    writes: usize,
}

/// An in-memory student + session store for testing.
///
/// Clones share the same state, so one store can back both a session manager
/// and a workflow.
#[derive(Clone, Default)]
pub struct NullStore {
    state: Arc<Mutex<State>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with records, bypassing keyed insertion.
    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().students = students;
        store
    }

    /// Make every subsequent write fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    /// Number of successful student writes (append, upsert, status update, clear).
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> T) -> Result<T, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(StoreError::Backend("null store write failure".into()));
        }
        state.writes += 1;
        Ok(f(&mut state))
    }
}

impl StudentStore for NullStore {
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.state.lock().unwrap().students.clone())
    }

    fn append_student(&self, record: &StudentRecord) -> Result<(), StoreError> {
        self.write(|s| s.students.push(record.clone()))
    }

    fn upsert_student(&self, record: &StudentRecord) -> Result<UpsertOutcome, StoreError> {
        self.write(|s| upsert_by_wallet(&mut s.students, record))
    }

    fn update_verification(
        &self,
        wallet: &WalletAddress,
        confidence: Confidence,
        mock: bool,
        at: Timestamp,
    ) -> Result<usize, StoreError> {
        self.write(|s| apply_comparison_by_wallet(&mut s.students, wallet, confidence, mock, at))
    }

    fn clear_students(&self) -> Result<(), StoreError> {
        self.write(|s| s.students.clear())
    }
}

impl SessionStore for NullStore {
    fn active_wallet(&self) -> Result<Option<WalletAddress>, StoreError> {
        Ok(self.state.lock().unwrap().active_wallet.clone())
    }

    fn set_active_wallet(&self, wallet: &WalletAddress) -> Result<(), StoreError> {
        self.state.lock().unwrap().active_wallet = Some(wallet.clone());
        Ok(())
    }

    fn clear_active_wallet(&self) -> Result<(), StoreError> {
        self.state.lock().unwrap().active_wallet = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbound_types::{Photo, Timestamp};

    fn record(wallet: &str) -> StudentRecord {
        StudentRecord::pending(
            "Name".into(),
            "College".into(),
            "Dept".into(),
            Photo::from_bytes("image/png", b"p"),
            Photo::from_bytes("image/png", b"i"),
            WalletAddress::parse(wallet).unwrap(),
            Timestamp::from_millis(0),
        )
    }

    #[test]
    fn clones_share_state() {
        let store = NullStore::new();
        let other = store.clone();
        store.append_student(&record("W1")).unwrap();
        assert_eq!(other.student_count().unwrap(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn failing_writes_leave_state_untouched() {
        let store = NullStore::with_students(vec![record("W1")]);
        store.fail_writes(true);
        assert!(store.append_student(&record("W2")).is_err());
        assert!(store.clear_students().is_err());
        assert_eq!(store.student_count().unwrap(), 1);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn session_survives_clearing_students() {
        let store = NullStore::new();
        let wallet = WalletAddress::parse("W1").unwrap();
        store.set_active_wallet(&wallet).unwrap();
        store.append_student(&record("W1")).unwrap();
        store.clear_students().unwrap();
        assert_eq!(store.active_wallet().unwrap(), Some(wallet));
    }
}
