//! LMDB implementation of StudentStore.
//!
//! The record list is one JSON value under the `students` key. Reads decode
//! and validate the whole list; writes re-encode it inside the same write
//! transaction that read it.

use heed::RoTxn;

use soulbound_store::{
    apply_comparison_by_wallet, upsert_by_wallet, StoreError, StudentStore, UpsertOutcome,
};
use soulbound_types::{Confidence, StudentRecord, Timestamp, WalletAddress};

use crate::environment::{LmdbStore, STUDENTS_KEY};
use crate::LmdbError;

impl LmdbStore {
    fn read_students(&self, txn: &RoTxn) -> Result<Vec<StudentRecord>, LmdbError> {
        match self.state_db.get(txn, STUDENTS_KEY)? {
            Some(bytes) => decode_students(bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Read the list, apply `f`, and write it back in one transaction.
    fn modify_students<T>(
        &self,
        f: impl FnOnce(&mut Vec<StudentRecord>) -> T,
    ) -> Result<T, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let mut records = self.read_students(&wtxn)?;
        let result = f(&mut records);
        let encoded = serde_json::to_vec(&records)
            .map_err(|e| LmdbError::Serialization(e.to_string()))?;
        self.state_db.put(&mut wtxn, STUDENTS_KEY, &encoded)?;
        wtxn.commit()?;
        Ok(result)
    }
}

pub(crate) fn decode_students(bytes: &[u8]) -> Result<Vec<StudentRecord>, LmdbError> {
    let records: Vec<StudentRecord> =
        serde_json::from_slice(bytes).map_err(|e| LmdbError::Corruption {
            key: STUDENTS_KEY.to_string(),
            reason: e.to_string(),
        })?;
    for record in &records {
        record.validate().map_err(|e| LmdbError::Corruption {
            key: STUDENTS_KEY.to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(records)
}

impl StudentStore for LmdbStore {
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_students(&rtxn)?)
    }

    fn append_student(&self, record: &StudentRecord) -> Result<(), StoreError> {
        self.modify_students(|records| records.push(record.clone()))?;
        Ok(())
    }

    fn upsert_student(&self, record: &StudentRecord) -> Result<UpsertOutcome, StoreError> {
        let outcome = self.modify_students(|records| upsert_by_wallet(records, record))?;
        tracing::debug!(wallet = %record.wallet_address, ?outcome, "upserted student record");
        Ok(outcome)
    }

    fn update_verification(
        &self,
        wallet: &WalletAddress,
        confidence: Confidence,
        mock: bool,
        at: Timestamp,
    ) -> Result<usize, StoreError> {
        let updated = self.modify_students(|records| {
            apply_comparison_by_wallet(records, wallet, confidence, mock, at)
        })?;
        tracing::debug!(%wallet, updated, "applied comparison result");
        Ok(updated)
    }

    fn clear_students(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.state_db
            .delete(&mut wtxn, STUDENTS_KEY)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
