//! LMDB storage backend for Soulbound ID.
//!
//! Implements the storage traits from `soulbound-store` using the `heed` LMDB
//! bindings. All state lives in one named database, `app_state`, holding two
//! entries:
//!
//! - `students`: JSON array of student records
//! - `connectedWallet`: the last-connected wallet address (UTF-8)
//!
//! Every mutation of the record list is a read-modify-write inside a single
//! LMDB write transaction, so concurrent writers serialize instead of
//! overwriting each other's list.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod session;
pub mod student;

pub use environment::{LmdbEnvironment, LmdbStore};
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
