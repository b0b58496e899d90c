use crate::io::{ImportError, StorageError};

/// Any failure at the crate's I/O edges. Board operations themselves are
/// infallible.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
