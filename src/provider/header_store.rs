//! Typed read/write access to stored headers and their scores.

use crate::{
    codec::HeaderCodecCache,
    error::HeaderChainError,
    header::Header,
    models::{EncodedHeader, HeaderScores, Headers},
    score::Score,
};
use alloy_primitives::B256;
use derive_more::Constructor;
use reth_db_api::transaction::{DbTx, DbTxMut};
use tracing::error;

/// Read/write access to the `Headers` and `HeaderScores` tables for one
/// transaction.
#[derive(Debug, Constructor)]
pub(crate) struct HeaderStoreProvider<'tx, TX> {
    tx: &'tx TX,
}

impl<TX> HeaderStoreProvider<'_, TX>
where
    TX: DbTx,
{
    /// Looks up a header by its hash, decoding its stored RLP bytes through
    /// `cache` when one is supplied. A cache hit skips the RLP decode
    /// entirely; a miss decodes once and populates the cache for the next
    /// lookup (ancestor walks during a reorg repeatedly re-fetch the same
    /// headers, which is exactly this cache's reason to exist).
    pub(crate) fn get_header_by_hash(
        &self,
        hash: B256,
        cache: Option<&HeaderCodecCache>,
    ) -> Result<Option<Header>, HeaderChainError> {
        let Some(raw) = self.tx.get::<Headers>(hash).inspect_err(|err| {
            error!(target: "header_chain", %hash, %err, "failed to read header");
        })?
        else {
            return Ok(None);
        };
        let header = match cache {
            Some(cache) => cache.get_or_decode(hash, &raw.0),
            None => Header::decode(&raw.0),
        }
        .map_err(|err| {
            HeaderChainError::Corruption(format!("stored header {hash} has invalid RLP: {err}"))
        })?;
        Ok(Some(header))
    }

    /// `true` if a header with this hash is stored. Checks backend presence
    /// directly, without decoding — `header_exists` is a linkage probe, not a
    /// lookup, so it never touches the codec cache.
    pub(crate) fn header_exists(&self, hash: B256) -> Result<bool, HeaderChainError> {
        Ok(self
            .tx
            .get::<Headers>(hash)
            .inspect_err(|err| {
                error!(target: "header_chain", %hash, %err, "failed to read header");
            })?
            .is_some())
    }

    /// Looks up the accumulated score for a stored header.
    pub(crate) fn get_score(&self, hash: B256) -> Result<Option<Score>, HeaderChainError> {
        self.tx.get::<HeaderScores>(hash).inspect_err(|err| {
            error!(target: "header_chain", %hash, %err, "failed to read header score");
        }).map_err(HeaderChainError::from)
    }
}

impl<TX> HeaderStoreProvider<'_, TX>
where
    TX: DbTxMut + DbTx,
{
    /// Writes a header, keyed by its own hash, and primes `cache` with it.
    /// Overwrites any existing entry for the same hash (headers are
    /// content-addressed, so this is only ever a no-op re-write in practice).
    pub(crate) fn put_header(
        &self,
        header: &Header,
        cache: Option<&HeaderCodecCache>,
    ) -> Result<(), HeaderChainError> {
        let hash = header.hash();
        self.tx.put::<Headers>(hash, EncodedHeader(header.encode())).inspect_err(|err| {
            error!(target: "header_chain", %hash, %err, "failed to write header");
        })?;
        if let Some(cache) = cache {
            cache.insert(header.clone());
        }
        Ok(())
    }

    /// Writes a header's accumulated score, keyed by the header's hash.
    pub(crate) fn put_score(&self, hash: B256, score: Score) -> Result<(), HeaderChainError> {
        self.tx.put::<HeaderScores>(hash, score).inspect_err(|err| {
            error!(target: "header_chain", %hash, %err, "failed to write header score");
        })?;
        Ok(())
    }
}
