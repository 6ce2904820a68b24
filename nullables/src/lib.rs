//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the verification workflow (clock, storage,
//! wallet provider, face-match API, camera) sits behind a trait. This crate
//! provides test-friendly implementations that:
//! - Return deterministic, scriptable values
//! - Record how they were called
//! - Never touch the filesystem, network, or hardware
//!
//! Usage: swap real implementations for nullables in tests.

pub mod camera;
pub mod clock;
pub mod face;
pub mod store;
pub mod wallet;

pub use camera::{NullCamera, NullCameraStream};
pub use clock::NullClock;
pub use face::NullFaceMatcher;
pub use store::NullStore;
pub use wallet::NullWallet;
