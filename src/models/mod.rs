//! Database table schemas for the header chain core.
//!
//! This module defines the value types, keys, and table layouts persisted to
//! the underlying key-value backend, registered via [`reth_db_api::TableSet`]
//! for database initialization.

use crate::score::Score;
use reth_codecs::Compact;
use reth_db_api::{
    table::{TableInfo, TableType},
    tables, TableSet, TableViewer,
};
use std::fmt;

/// Implements [`reth_db_api::table::Compress`] and [`reth_db_api::table::Decompress`] for types
/// that implement [`reth_codecs::Compact`].
macro_rules! impl_compression_for_compact {
    ($($name:ident),+) => {
        $(
            impl reth_db_api::table::Compress for $name {
                type Compressed = Vec<u8>;

                fn compress_to_buf<B: bytes::BufMut + AsMut<[u8]>>(&self, buf: &mut B) {
                    let _ = reth_codecs::Compact::to_compact(self, buf);
                }
            }

            impl reth_db_api::table::Decompress for $name {
                fn decompress(value: &[u8]) -> Result<$name, reth_db_api::DatabaseError> {
                    let (obj, _) = reth_codecs::Compact::from_compact(value, value.len());
                    Ok(obj)
                }
            }
        )+
    };
}

impl_compression_for_compact!(Score);

/// A header's raw canonical RLP bytes, as stored on disk.
///
/// Headers are *not* stored pre-decoded: [`HeaderStoreProvider`](crate::provider)
/// decodes them one level up, through the bounded codec cache (component B),
/// so repeated ancestor-walk lookups of the same header skip the RLP decode
/// entirely on a cache hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedHeader(pub(crate) Vec<u8>);

impl reth_db_api::table::Compress for EncodedHeader {
    type Compressed = Vec<u8>;

    fn compress_to_buf<B: bytes::BufMut + AsMut<[u8]>>(&self, buf: &mut B) {
        buf.put_slice(&self.0);
    }
}

impl reth_db_api::table::Decompress for EncodedHeader {
    fn decompress(value: &[u8]) -> Result<Self, reth_db_api::DatabaseError> {
        Ok(Self(value.to_vec()))
    }
}

tables! {
    /// Headers, keyed by their own hash. The sole source of truth for header
    /// bytes; the canonical index and head pointer below only ever reference
    /// keys into this table. Values are raw RLP bytes ([`EncodedHeader`]), not
    /// pre-decoded headers — decoding happens through the codec cache.
    table Headers {
        type Key = alloy_primitives::B256;
        type Value = EncodedHeader;
    }

    /// Each header's accumulated score (cumulative difficulty from genesis
    /// through that header), keyed by the same hash as [`Headers`].
    table HeaderScores {
        type Key = alloy_primitives::B256;
        type Value = Score;
    }

    /// The canonical chain's number-to-hash mapping. A row at number `n`
    /// names the hash of the canonical header at that height; rows are
    /// overwritten, not appended, as reorgs move the canonical chain.
    table CanonicalHeaders {
        type Key = u64;
        type Value = alloy_primitives::B256;
    }

    /// Single-row table holding the hash of the current canonical head.
    /// Keyed by a fixed sentinel ([`HEAD_KEY`]) since there is exactly one
    /// row — the same kind of primitive key [`CanonicalHeaders`] already uses
    /// for block numbers, rather than an enum carrying a single variant.
    table HeadPointer {
        type Key = u8;
        type Value = alloy_primitives::B256;
    }
}

/// The sole key ever written to or read from [`HeadPointer`].
pub(crate) const HEAD_KEY: u8 = 0;
