//! The wallet SDK boundary.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use soulbound_types::WalletAddress;

use crate::error::WalletError;

/// A wallet provider that can hand out connected account addresses.
///
/// The first account of a returned list is the session address.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Run the interactive connect flow.
    async fn connect(&self) -> Result<Vec<WalletAddress>, WalletError>;

    /// Re-establish a previous session without user interaction.
    async fn reconnect_session(&self) -> Result<Vec<WalletAddress>, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;
}

#[async_trait]
impl<T: WalletConnector + ?Sized> WalletConnector for std::sync::Arc<T> {
    async fn connect(&self) -> Result<Vec<WalletAddress>, WalletError> {
        (**self).connect().await
    }

    async fn reconnect_session(&self) -> Result<Vec<WalletAddress>, WalletError> {
        (**self).reconnect_session().await
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        (**self).disconnect().await
    }
}

/// Connector backed by a fixed account list, for headless use.
///
/// `reconnect_session` only succeeds after `connect` in the same process, which
/// mirrors a provider that keeps its session in memory.
#[derive(Debug, Default)]
pub struct StaticConnector {
    accounts: Vec<WalletAddress>,
    connected: AtomicBool,
}

impl StaticConnector {
    pub fn new(accounts: Vec<WalletAddress>) -> Self {
        Self {
            accounts,
            connected: AtomicBool::new(false),
        }
    }

    pub fn single(address: WalletAddress) -> Self {
        Self::new(vec![address])
    }
}

#[async_trait]
impl WalletConnector for StaticConnector {
    async fn connect(&self) -> Result<Vec<WalletAddress>, WalletError> {
        if self.accounts.is_empty() {
            return Err(WalletError::Connection("no accounts available".into()));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    async fn reconnect_session(&self) -> Result<Vec<WalletAddress>, WalletError> {
        if self.connected.load(Ordering::SeqCst) && !self.accounts.is_empty() {
            Ok(self.accounts.clone())
        } else {
            Err(WalletError::NoSession)
        }
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}
