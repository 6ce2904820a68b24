//! LMDB implementation of SessionStore.

use soulbound_store::{SessionStore, StoreError};
use soulbound_types::WalletAddress;

use crate::environment::{LmdbStore, CONNECTED_WALLET_KEY};
use crate::LmdbError;

impl SessionStore for LmdbStore {
    fn active_wallet(&self) -> Result<Option<WalletAddress>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(bytes) = self
            .state_db
            .get(&rtxn, CONNECTED_WALLET_KEY)
            .map_err(LmdbError::from)?
        else {
            return Ok(None);
        };
        let raw = std::str::from_utf8(bytes).map_err(|e| LmdbError::Corruption {
            key: CONNECTED_WALLET_KEY.to_string(),
            reason: e.to_string(),
        })?;
        let address = WalletAddress::parse(raw).map_err(|e| LmdbError::Corruption {
            key: CONNECTED_WALLET_KEY.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(address))
    }

    fn set_active_wallet(&self, wallet: &WalletAddress) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.state_db
            .put(&mut wtxn, CONNECTED_WALLET_KEY, wallet.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn clear_active_wallet(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.state_db
            .delete(&mut wtxn, CONNECTED_WALLET_KEY)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAP_SIZE;
    use crate::LmdbEnvironment;
    use soulbound_store::StudentStore;

    #[test]
    fn session_set_get_clear() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let store = env.store();
        assert_eq!(store.active_wallet().unwrap(), None);

        let addr = WalletAddress::parse("SESSIONWALLET").unwrap();
        store.set_active_wallet(&addr).unwrap();
        assert_eq!(store.active_wallet().unwrap(), Some(addr));

        store.clear_active_wallet().unwrap();
        assert_eq!(store.active_wallet().unwrap(), None);
    }

    #[test]
    fn clearing_students_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let store = env.store();
        let addr = WalletAddress::parse("KEEPME").unwrap();
        store.set_active_wallet(&addr).unwrap();
        store.clear_students().unwrap();
        assert_eq!(store.active_wallet().unwrap(), Some(addr));
    }
}
