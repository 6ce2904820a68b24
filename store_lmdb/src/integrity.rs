//! Startup integrity check for the persisted state.
//!
//! Decodes every entry and validates every record, collecting problems into a
//! report instead of failing on the first one.

use soulbound_types::{StudentRecord, WalletAddress};

use crate::environment::{LmdbStore, CONNECTED_WALLET_KEY, STUDENTS_KEY};
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub records_checked: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the stored record list and session entry.
pub fn check_integrity(store: &LmdbStore) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        records_checked: 0,
        errors: Vec::new(),
    };

    let rtxn = store.env.read_txn()?;

    if let Some(bytes) = store.state_db.get(&rtxn, STUDENTS_KEY)? {
        match serde_json::from_slice::<Vec<StudentRecord>>(bytes) {
            Ok(records) => {
                for (i, record) in records.iter().enumerate() {
                    report.records_checked += 1;
                    if let Err(e) = record.validate() {
                        report.errors.push(format!("record {i}: {e}"));
                    }
                }
            }
            Err(e) => report
                .errors
                .push(format!("'{STUDENTS_KEY}' is not a record list: {e}")),
        }
    }

    if let Some(bytes) = store.state_db.get(&rtxn, CONNECTED_WALLET_KEY)? {
        let valid = std::str::from_utf8(bytes)
            .ok()
            .map(|s| WalletAddress::parse(s).is_ok())
            .unwrap_or(false);
        if !valid {
            report
                .errors
                .push(format!("'{CONNECTED_WALLET_KEY}' is not a wallet address"));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAP_SIZE;
    use crate::LmdbEnvironment;

    #[test]
    fn fresh_store_is_healthy() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let report = check_integrity(&env.store()).unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.records_checked, 0);
    }

    #[test]
    fn inconsistent_record_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let store = env.store();
        let json = br#"[{
            "name": "X", "college": "Y", "department": "Z",
            "photo": "aGk=", "idPhoto": "aGk=",
            "walletAddress": "BROKEN",
            "timestamp": "2024-01-01T00:00:00Z",
            "verified": true,
            "verificationStatus": "pending"
        }]"#;
        {
            let mut wtxn = store.env.write_txn().unwrap();
            store.state_db.put(&mut wtxn, STUDENTS_KEY, json).unwrap();
            store
                .state_db
                .put(&mut wtxn, CONNECTED_WALLET_KEY, b"has space")
                .unwrap();
            wtxn.commit().unwrap();
        }
        let report = check_integrity(&store).unwrap();
        assert_eq!(report.records_checked, 1);
        assert_eq!(report.errors.len(), 2);
        assert!(!report.is_healthy());
    }
}
