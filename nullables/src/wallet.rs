//! Nullable wallet provider: scripted accounts without a wallet SDK.

use async_trait::async_trait;
use soulbound_types::WalletAddress;
use soulbound_wallet_core::{WalletConnector, WalletError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A wallet connector with scripted results.
///
/// By default `connect` and `reconnect_session` both return the configured
/// accounts. Reconnect and disconnect can be made to fail to exercise the
/// session fallbacks.
pub struct NullWallet {
    accounts: Vec<WalletAddress>,
    reconnect_error: Mutex<Option<String>>,
    disconnect_error: Mutex<Option<String>>,
    disconnects: AtomicUsize,
}

impl NullWallet {
    pub fn new(accounts: Vec<WalletAddress>) -> Self {
        Self {
            accounts,
            reconnect_error: Mutex::new(None),
            disconnect_error: Mutex::new(None),
            disconnects: AtomicUsize::new(0),
        }
    }

    pub fn single(address: WalletAddress) -> Self {
        Self::new(vec![address])
    }

    /// Make `reconnect_session` fail with the given reason.
    pub fn fail_reconnect(self, reason: &str) -> Self {
        *self.reconnect_error.lock().unwrap() = Some(reason.to_string());
        self
    }

    /// Make `disconnect` fail with the given reason.
    pub fn fail_disconnect(self, reason: &str) -> Self {
        *self.disconnect_error.lock().unwrap() = Some(reason.to_string());
        self
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletConnector for NullWallet {
    async fn connect(&self) -> Result<Vec<WalletAddress>, WalletError> {
        if self.accounts.is_empty() {
            return Err(WalletError::Connection("user rejected the request".into()));
        }
        Ok(self.accounts.clone())
    }

    async fn reconnect_session(&self) -> Result<Vec<WalletAddress>, WalletError> {
        if let Some(reason) = self.reconnect_error.lock().unwrap().clone() {
            return Err(WalletError::Other(reason));
        }
        if self.accounts.is_empty() {
            return Err(WalletError::NoSession);
        }
        Ok(self.accounts.clone())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        match self.disconnect_error.lock().unwrap().clone() {
            Some(reason) => Err(WalletError::Other(reason)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_reconnect_failure() {
        let wallet = NullWallet::single(WalletAddress::parse("W1").unwrap())
            .fail_reconnect("session expired");
        assert!(wallet.connect().await.is_ok());
        assert!(wallet.reconnect_session().await.is_err());
    }

    #[tokio::test]
    async fn disconnect_is_counted_even_when_it_fails() {
        let wallet = NullWallet::new(Vec::new()).fail_disconnect("gone");
        assert!(wallet.disconnect().await.is_err());
        assert_eq!(wallet.disconnect_count(), 1);
    }
}
