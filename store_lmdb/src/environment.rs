//! LMDB environment setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Name of the single database holding application state.
pub(crate) const STATE_DB: &str = "app_state";

/// Key of the JSON record list.
pub(crate) const STUDENTS_KEY: &str = "students";

/// Key of the last-connected wallet address.
pub(crate) const CONNECTED_WALLET_KEY: &str = "connectedWallet";

/// Default map size: 1 GiB. Records embed base64 photos, so lists grow fast.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and the state database handle.
pub struct LmdbEnvironment {
    path: PathBuf,
    env: Arc<Env>,
    state_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // the memory map is never modified outside of heed transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let state_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(STATE_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");

        Ok(Self {
            path: path.to_path_buf(),
            env: Arc::new(env),
            state_db,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A store handle implementing both student and session storage.
    pub fn store(&self) -> LmdbStore {
        LmdbStore {
            env: Arc::clone(&self.env),
            state_db: self.state_db,
        }
    }
}

/// Student and session storage backed by the `app_state` database.
#[derive(Clone)]
pub struct LmdbStore {
    pub(crate) env: Arc<Env>,
    pub(crate) state_db: Database<Str, Bytes>,
}
