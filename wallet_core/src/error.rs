use soulbound_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet connection failed: {0}")]
    Connection(String),

    #[error("no wallet session to restore")]
    NoSession,

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}
