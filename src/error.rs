//! Error taxonomy for the header chain core.

use alloy_primitives::B256;
use reth_db::DatabaseError;
use thiserror::Error;

/// Errors raised by the header store, canonical index, and chain writer.
///
/// A precondition violation is distinct from an expected "not found" lookup,
/// which is in turn distinct from the internal-corruption case that should
/// never be reachable through the public `persist`/`persist_chain` surface.
#[derive(Debug, Error)]
pub enum HeaderChainError {
    /// A precondition on an input was violated before any write took place
    /// (wrong-length hash, non-contiguous chain). Caller bug.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The requested header (or its score, which reuses this kind since score
    /// presence implies header presence) is absent from the backend.
    #[error("header not found: {0}")]
    HeaderNotFound(B256),

    /// No canonical hash is recorded at the requested block number.
    #[error("no canonical header at block number {0}")]
    CanonicalEntryNotFound(u64),

    /// The head pointer is unset; the database is empty.
    #[error("canonical head not found")]
    CanonicalHeadNotFound,

    /// `persist_chain` was attempted with an unknown, non-genesis parent.
    #[error("parent not found: {0}")]
    ParentNotFound(B256),

    /// An internal invariant was violated (e.g. the head pointer references a
    /// hash with no stored header). Not a caller-lookup miss; surfaced as-is.
    #[error("internal corruption: {0}")]
    Corruption(String),

    /// The underlying `reth-db` transaction failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl PartialEq for HeaderChainError {
    fn eq(&self, other: &Self) -> bool {
        use HeaderChainError::*;
        match (self, other) {
            (ValidationError(a), ValidationError(b)) => a == b,
            (HeaderNotFound(a), HeaderNotFound(b)) => a == b,
            (CanonicalEntryNotFound(a), CanonicalEntryNotFound(b)) => a == b,
            (CanonicalHeadNotFound, CanonicalHeadNotFound) => true,
            (ParentNotFound(a), ParentNotFound(b)) => a == b,
            (Corruption(a), Corruption(b)) => a == b,
            (Database(a), Database(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for HeaderChainError {}
