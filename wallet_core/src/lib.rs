//! Wallet session adapter for Soulbound ID.
//!
//! The wallet provider is reached through [`WalletConnector`]. A
//! [`SessionManager`] wraps a connector with the cached session address:
//! - connect and cache the first account
//! - restore a session, optionally falling back to the cached address
//! - disconnect and clear the cache

pub mod connector;
pub mod error;
pub mod session;

pub use connector::{StaticConnector, WalletConnector};
pub use error::{SessionError, WalletError};
pub use session::{ReconnectPolicy, RestoredSession, SessionManager, SessionSource};
