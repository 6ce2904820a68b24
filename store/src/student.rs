//! Student record storage trait.

use crate::StoreError;
use soulbound_types::{Confidence, StudentRecord, Timestamp, WalletAddress};

/// What an upsert did to the record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had the key; the record was appended.
    Inserted,
    /// This many records with the key were replaced.
    Updated(usize),
}

/// Trait for student record storage.
///
/// The wallet address is the record key. Lookups return the first record with
/// a matching key; lists written by older clients may hold duplicates.
pub trait StudentStore {
    /// All records in insertion order.
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError>;

    /// Append a record without checking for an existing key.
    fn append_student(&self, record: &StudentRecord) -> Result<(), StoreError>;

    /// Replace the record(s) stored under the record's wallet address, or
    /// append it if there are none. Implementations must apply this atomically.
    fn upsert_student(&self, record: &StudentRecord) -> Result<UpsertOutcome, StoreError>;

    /// Apply a comparison result to every record stored under `wallet`,
    /// leaving the rest of each record as it is. Returns how many records
    /// were updated. Implementations must apply this atomically.
    fn update_verification(
        &self,
        wallet: &WalletAddress,
        confidence: Confidence,
        mock: bool,
        at: Timestamp,
    ) -> Result<usize, StoreError>;

    /// Delete every record.
    fn clear_students(&self) -> Result<(), StoreError>;

    fn get_student(&self, wallet: &WalletAddress) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self
            .list_students()?
            .into_iter()
            .find(|r| &r.wallet_address == wallet))
    }

    fn student_count(&self) -> Result<u64, StoreError> {
        self.list_students().map(|v| v.len() as u64)
    }
}

/// Keyed replacement shared by all backends.
///
/// Every record with the same wallet address is replaced so duplicates left by
/// older clients stay consistent with each other.
pub fn upsert_by_wallet(records: &mut Vec<StudentRecord>, record: &StudentRecord) -> UpsertOutcome {
    let mut replaced = 0;
    for existing in records
        .iter_mut()
        .filter(|r| r.wallet_address == record.wallet_address)
    {
        *existing = record.clone();
        replaced += 1;
    }
    if replaced == 0 {
        records.push(record.clone());
        UpsertOutcome::Inserted
    } else {
        UpsertOutcome::Updated(replaced)
    }
}

/// Status-only update shared by all backends. Duplicates keep their own
/// registration data.
pub fn apply_comparison_by_wallet(
    records: &mut [StudentRecord],
    wallet: &WalletAddress,
    confidence: Confidence,
    mock: bool,
    at: Timestamp,
) -> usize {
    let mut updated = 0;
    for record in records.iter_mut().filter(|r| &r.wallet_address == wallet) {
        record.apply_comparison(confidence, mock, at);
        updated += 1;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbound_types::{Photo, VerificationStatus};

    fn record(wallet: &str, name: &str) -> StudentRecord {
        StudentRecord::pending(
            name.into(),
            "College".into(),
            "Dept".into(),
            Photo::from_bytes("image/jpeg", b"a"),
            Photo::from_bytes("image/jpeg", b"b"),
            WalletAddress::parse(wallet).unwrap(),
            Timestamp::from_millis(0),
        )
    }

    #[test]
    fn upsert_appends_unknown_key() {
        let mut list = vec![record("W1", "one")];
        assert_eq!(
            upsert_by_wallet(&mut list, &record("W2", "two")),
            UpsertOutcome::Inserted
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "two");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut list = vec![record("W1", "one"), record("W2", "two")];
        let mut updated = record("W1", "one");
        updated.apply_comparison(Confidence::new(90.0).unwrap(), false, Timestamp::from_millis(5));
        assert_eq!(
            upsert_by_wallet(&mut list, &updated),
            UpsertOutcome::Updated(1)
        );
        assert_eq!(list.len(), 2);
        assert!(list[0].verified);
        assert!(!list[1].verified);
    }

    #[test]
    fn upsert_updates_every_duplicate() {
        let mut list = vec![record("W1", "first"), record("W1", "second")];
        let replacement = record("W1", "merged");
        assert_eq!(
            upsert_by_wallet(&mut list, &replacement),
            UpsertOutcome::Updated(2)
        );
        assert!(list.iter().all(|r| r.name == "merged"));
    }

    #[test]
    fn comparison_touches_status_fields_of_each_duplicate() {
        let mut list = vec![
            record("W1", "first"),
            record("W2", "other"),
            record("W1", "second"),
        ];
        let wallet = WalletAddress::parse("W1").unwrap();
        let updated = apply_comparison_by_wallet(
            &mut list,
            &wallet,
            Confidence::new(91.0).unwrap(),
            true,
            Timestamp::from_millis(9),
        );
        assert_eq!(updated, 2);
        assert_eq!(list[0].name, "first");
        assert_eq!(list[2].name, "second");
        assert!(list[0].verified && list[2].verified);
        assert_eq!(list[2].mock_verification, Some(true));
        assert_eq!(list[1].verification_status, VerificationStatus::Pending);
    }

    #[test]
    fn comparison_for_unknown_wallet_updates_nothing() {
        let mut list = vec![record("W1", "first")];
        let updated = apply_comparison_by_wallet(
            &mut list,
            &WalletAddress::parse("W9").unwrap(),
            Confidence::new(91.0).unwrap(),
            false,
            Timestamp::from_millis(9),
        );
        assert_eq!(updated, 0);
        assert!(!list[0].verified);
    }
}
