//! Active wallet session storage trait.

use crate::StoreError;
use soulbound_types::WalletAddress;

/// Persists the last-connected wallet address.
///
/// The cached address lets a session continue when the wallet SDK cannot
/// re-establish its own session.
pub trait SessionStore {
    fn active_wallet(&self) -> Result<Option<WalletAddress>, StoreError>;
    fn set_active_wallet(&self, wallet: &WalletAddress) -> Result<(), StoreError>;
    fn clear_active_wallet(&self) -> Result<(), StoreError>;
}
