//! Wallet session lifecycle: connect, restore, disconnect.
//!
//! The connected address is cached in the [`SessionStore`] so a session can be
//! restored when the wallet provider has lost its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soulbound_store::SessionStore;
use soulbound_types::WalletAddress;

use crate::connector::WalletConnector;
use crate::error::{SessionError, WalletError};

/// What `restore` does when the provider cannot reconnect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconnectPolicy {
    /// Report no session.
    Strict,
    /// Continue with the cached address.
    #[default]
    FallbackToCached,
}

impl ReconnectPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::FallbackToCached => "fallback-to-cached",
        }
    }
}

impl fmt::Display for ReconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconnectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "fallback-to-cached" | "cached" => Ok(Self::FallbackToCached),
            other => Err(format!("unknown reconnect policy: {other}")),
        }
    }
}

/// Where a restored address came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSource {
    /// The provider re-established its session.
    Live,
    /// The provider failed; the cached address was used.
    Cached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoredSession {
    pub address: WalletAddress,
    pub source: SessionSource,
}

/// Owns a connector and the cached session address.
pub struct SessionManager<C, S> {
    connector: C,
    store: S,
    policy: ReconnectPolicy,
}

impl<C: WalletConnector, S: SessionStore> SessionManager<C, S> {
    pub fn new(connector: C, store: S, policy: ReconnectPolicy) -> Self {
        Self {
            connector,
            store,
            policy,
        }
    }

    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Connect interactively and cache the session address.
    pub async fn connect(&self) -> Result<WalletAddress, SessionError> {
        let accounts = self.connector.connect().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::Connection("wallet returned no accounts".into()))?;
        self.store.set_active_wallet(&address)?;
        tracing::info!(wallet = %address, "wallet connected");
        Ok(address)
    }

    /// Restore the previous session, if any.
    pub async fn restore(&self) -> Result<Option<RestoredSession>, SessionError> {
        let reconnected = self
            .connector
            .reconnect_session()
            .await
            .and_then(|accounts| accounts.into_iter().next().ok_or(WalletError::NoSession));

        match reconnected {
            Ok(address) => {
                self.store.set_active_wallet(&address)?;
                tracing::debug!(wallet = %address, "wallet session restored");
                Ok(Some(RestoredSession {
                    address,
                    source: SessionSource::Live,
                }))
            }
            Err(e) => match self.policy {
                ReconnectPolicy::Strict => {
                    tracing::debug!(error = %e, "wallet reconnect failed");
                    Ok(None)
                }
                ReconnectPolicy::FallbackToCached => {
                    let Some(address) = self.store.active_wallet()? else {
                        tracing::debug!(error = %e, "wallet reconnect failed, nothing cached");
                        return Ok(None);
                    };
                    tracing::warn!(
                        error = %e,
                        wallet = %address,
                        "wallet reconnect failed, using cached address"
                    );
                    Ok(Some(RestoredSession {
                        address,
                        source: SessionSource::Cached,
                    }))
                }
            },
        }
    }

    /// Disconnect and forget the cached address.
    ///
    /// Provider errors are logged; the cache is cleared regardless.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        if let Err(e) = self.connector.disconnect().await {
            tracing::warn!(error = %e, "wallet disconnect failed");
        }
        self.store.clear_active_wallet()?;
        tracing::info!("wallet disconnected");
        Ok(())
    }

    /// The cached session address.
    pub fn active(&self) -> Result<Option<WalletAddress>, SessionError> {
        Ok(self.store.active_wallet()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use soulbound_store::StoreError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySession(Mutex<Option<WalletAddress>>);

    impl SessionStore for MemorySession {
        fn active_wallet(&self) -> Result<Option<WalletAddress>, StoreError> {
            Ok(self.0.lock().unwrap().clone())
        }
        fn set_active_wallet(&self, wallet: &WalletAddress) -> Result<(), StoreError> {
            *self.0.lock().unwrap() = Some(wallet.clone());
            Ok(())
        }
        fn clear_active_wallet(&self) -> Result<(), StoreError> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    /// Connector whose reconnect always fails and whose disconnect errors.
    struct BrokenProvider;

    #[async_trait]
    impl WalletConnector for BrokenProvider {
        async fn connect(&self) -> Result<Vec<WalletAddress>, WalletError> {
            Ok(vec![addr("LIVE")])
        }
        async fn reconnect_session(&self) -> Result<Vec<WalletAddress>, WalletError> {
            Err(WalletError::Other("provider crashed".into()))
        }
        async fn disconnect(&self) -> Result<(), WalletError> {
            Err(WalletError::Other("provider crashed".into()))
        }
    }

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::parse(s).unwrap()
    }

    fn cached(address: &str) -> MemorySession {
        let store = MemorySession::default();
        store.set_active_wallet(&addr(address)).unwrap();
        store
    }

    #[tokio::test]
    async fn connect_caches_first_account() {
        let connector = crate::StaticConnector::new(vec![addr("FIRST"), addr("SECOND")]);
        let manager = SessionManager::new(
            connector,
            MemorySession::default(),
            ReconnectPolicy::default(),
        );
        assert_eq!(manager.connect().await.unwrap(), addr("FIRST"));
        assert_eq!(manager.active().unwrap(), Some(addr("FIRST")));
    }

    #[tokio::test]
    async fn reconnect_failure_falls_back_to_cache() {
        let manager = SessionManager::new(
            BrokenProvider,
            cached("CACHED"),
            ReconnectPolicy::FallbackToCached,
        );
        let restored = manager.restore().await.unwrap().unwrap();
        assert_eq!(restored.address, addr("CACHED"));
        assert_eq!(restored.source, SessionSource::Cached);
    }

    #[tokio::test]
    async fn strict_policy_ignores_cache() {
        let manager = SessionManager::new(BrokenProvider, cached("CACHED"), ReconnectPolicy::Strict);
        assert_eq!(manager.restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn nothing_cached_restores_nothing() {
        let manager = SessionManager::new(
            BrokenProvider,
            MemorySession::default(),
            ReconnectPolicy::FallbackToCached,
        );
        assert_eq!(manager.restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn live_restore_refreshes_cache() {
        let connector = crate::StaticConnector::single(addr("LIVE"));
        connector.connect().await.unwrap();
        let manager = SessionManager::new(connector, cached("OLD"), ReconnectPolicy::default());

        let restored = manager.restore().await.unwrap().unwrap();
        assert_eq!(restored.source, SessionSource::Live);
        assert_eq!(manager.active().unwrap(), Some(addr("LIVE")));
    }

    #[tokio::test]
    async fn disconnect_clears_cache_even_when_provider_fails() {
        let manager = SessionManager::new(BrokenProvider, cached("CACHED"), ReconnectPolicy::default());
        manager.disconnect().await.unwrap();
        assert_eq!(manager.active().unwrap(), None);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("strict".parse::<ReconnectPolicy>(), Ok(ReconnectPolicy::Strict));
        assert_eq!(
            "fallback-to-cached".parse::<ReconnectPolicy>(),
            Ok(ReconnectPolicy::FallbackToCached)
        );
        assert!("sometimes".parse::<ReconnectPolicy>().is_err());
    }
}
