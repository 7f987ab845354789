use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::symbols::Symbol;

/// Every way a run can fail. Nothing in the crate recovers locally; the
/// error travels up to the caller, which aborts the run.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to allocate memory for {what}")]
    AllocationFailure {
        what: String,
        #[source]
        source: TryReserveError,
    },

    #[error("could not access file \"{}\": {source}", .path.display())]
    FileAccessFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A desired output symbol that was never observed while building the
    /// translator for that output position.
    #[error("symbol {symbol} ({}) not found in translation entries of output {output}", printable(.symbol))]
    UnknownSymbol { output: usize, symbol: Symbol },

    #[error("model (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;

fn printable(symbol: &Symbol) -> char {
    *symbol as char
}

impl NetError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        NetError::InvalidParameter(msg.into())
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NetError::FileAccessFailure { path: path.into(), source }
    }
}

/// Allocates an empty `Vec` with room for `len` elements, reporting failure
/// instead of aborting the process.
pub(crate) fn try_with_capacity<T>(len: usize, what: impl FnOnce() -> String) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| NetError::AllocationFailure { what: what(), source })?;
    Ok(v)
}
