//! Public reader/writer interfaces over the header chain.
//!
//! Two writer traits expose the same reorg algorithm: [`HeaderChainWriter`] is
//! synchronous, [`AsyncHeaderChainWriter`] suspends at the backend boundary.
//! Neither duplicates the algorithm — the async surface delegates to the sync
//! one on a blocking-friendly executor thread.

use crate::{error::HeaderChainError, header::Header};
use async_trait::async_trait;

/// Read access to stored headers, their scores, and the canonical index.
pub trait HeaderChainReader: std::fmt::Debug {
    /// Looks up a header by its hash.
    fn get_header_by_hash(&self, hash: alloy_primitives::B256) -> Result<Header, HeaderChainError>;

    /// `true` if a header with this hash is stored.
    fn header_exists(&self, hash: alloy_primitives::B256) -> Result<bool, HeaderChainError>;

    /// Looks up a header's accumulated score.
    fn get_score(
        &self,
        hash: alloy_primitives::B256,
    ) -> Result<crate::score::Score, HeaderChainError>;

    /// Looks up the canonical hash at a block number.
    fn get_canonical_hash(&self, number: u64) -> Result<alloy_primitives::B256, HeaderChainError>;

    /// Looks up the canonical header at a block number.
    fn get_canonical_header_by_number(&self, number: u64) -> Result<Header, HeaderChainError>;

    /// Looks up the current canonical head header.
    fn get_canonical_head(&self) -> Result<Header, HeaderChainError>;

    /// Probes for the current canonical head without treating an empty
    /// database as an error.
    fn try_get_head(&self) -> Result<Option<Header>, HeaderChainError>;
}

/// Synchronous persistence of headers and the reorg algorithm.
pub trait HeaderChainWriter: HeaderChainReader {
    /// Persists a single header; identical to `persist_chain([header])`.
    fn persist(&self, header: Header) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> {
        self.persist_chain(vec![header])
    }

    /// Persists an ordered, parent-to-child sequence of headers, performing a
    /// canonical-chain reorg if the resulting tip outweighs the current head.
    ///
    /// Returns `(new_canonical, old_canonical)`: the headers newly installed
    /// on the canonical chain, and the headers they displaced, both in
    /// ascending block-number order. Both are empty if the sequence is empty
    /// or does not win the canonical head.
    fn persist_chain(
        &self,
        headers: Vec<Header>,
    ) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>;
}

/// Asynchronous mirror of [`HeaderChainWriter`], suspending at the backend
/// boundary instead of blocking the calling task.
#[async_trait]
pub trait AsyncHeaderChainWriter: Send + Sync {
    /// Async form of [`HeaderChainWriter::persist`].
    async fn persist(&self, header: Header) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>;

    /// Async form of [`HeaderChainWriter::persist_chain`].
    async fn persist_chain(
        &self,
        headers: Vec<Header>,
    ) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>;
}
