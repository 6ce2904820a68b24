//! Abstract storage traits for Soulbound ID.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod session;
pub mod student;

pub use error::StoreError;
pub use session::SessionStore;
pub use student::{apply_comparison_by_wallet, upsert_by_wallet, StudentStore, UpsertOutcome};
