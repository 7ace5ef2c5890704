//! The block header type and its canonical RLP encoding.
//!
//! The RLP codec itself and the Keccak-256 hash function are external
//! collaborators, named here only at their interface (`alloy_rlp`,
//! `alloy_primitives::keccak256`).

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The conventional parent hash of a genesis header.
pub const ALL_ZERO_HASH: B256 = B256::ZERO;

/// The consensus-relevant fields of a block header, in their canonical RLP
/// field order. This is a representative, non-exhaustive header: it carries
/// enough fields to exercise hashing, RLP round-tripping, and the reorg
/// algorithm without pinning this crate to one chain's exact header shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable)]
pub struct HeaderData {
    /// Hash of the parent block's header.
    pub parent_hash: B256,
    /// Block number.
    pub number: u64,
    /// Per-block proof-of-work difficulty. Always positive for a valid header.
    pub difficulty: U256,
    /// Address that receives the block reward.
    pub beneficiary: Address,
    /// Root of the post-state trie.
    pub state_root: B256,
    /// Unix timestamp, in seconds.
    pub timestamp: u64,
    /// Opaque extra data, miner-supplied.
    pub extra_data: Bytes,
    /// Gas limit for the block.
    pub gas_limit: u64,
    /// Gas used by the block's transactions.
    pub gas_used: u64,
}

/// An immutable block header with a lazily-computed, memoized hash.
///
/// Equality and ordering are defined over the consensus fields; the memoized
/// hash is a cache, not part of the header's identity.
#[derive(Debug, Clone)]
pub struct Header {
    data: HeaderData,
    hash: OnceLock<B256>,
}

impl Header {
    /// Wraps consensus fields as a header with no hash computed yet.
    pub fn new(data: HeaderData) -> Self {
        Self { data, hash: OnceLock::new() }
    }

    /// The header's own hash: `keccak256(rlp(header))`, computed once and cached.
    pub fn hash(&self) -> B256 {
        *self.hash.get_or_init(|| keccak256(alloy_rlp::encode(&self.data)))
    }

    /// Hash of the parent block's header.
    pub const fn parent_hash(&self) -> B256 {
        self.data.parent_hash
    }

    /// Block number.
    pub const fn number(&self) -> u64 {
        self.data.number
    }

    /// Per-block difficulty.
    pub const fn difficulty(&self) -> U256 {
        self.data.difficulty
    }

    /// `true` if this header's parent hash is the conventional all-zero genesis parent.
    pub fn is_genesis(&self) -> bool {
        self.data.parent_hash == ALL_ZERO_HASH
    }

    /// Borrows the underlying consensus fields.
    pub const fn data(&self) -> &HeaderData {
        &self.data
    }

    /// Consumes the header, returning the consensus fields.
    pub fn into_data(self) -> HeaderData {
        self.data
    }

    /// Encodes the header to its canonical RLP byte representation.
    pub fn encode(&self) -> Vec<u8> {
        alloy_rlp::encode(&self.data)
    }

    /// Decodes a header from its canonical RLP byte representation.
    pub fn decode(mut bytes: &[u8]) -> Result<Self, alloy_rlp::Error> {
        let data = HeaderData::decode(&mut bytes)?;
        Ok(Self::new(data))
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Header {}

impl From<HeaderData> for Header {
    fn from(data: HeaderData) -> Self {
        Self::new(data)
    }
}
