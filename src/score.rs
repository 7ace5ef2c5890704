//! Cumulative chain score (total difficulty) and its storage encoding.

use alloy_primitives::U256;
use bytes::BufMut;
use reth_codecs::Compact;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A chain's cumulative difficulty, accumulated by summing each header's own
/// difficulty along its ancestor chain.
///
/// Stored as a big-endian, leading-zero-free byte string (zero encodes as an
/// empty string), matching the encoding used for difficulty elsewhere in this
/// core. This is a dedicated storage codec, not an RLP encoding: scores never
/// leave this database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Score(pub U256);

impl Score {
    /// The zero score, used to seed a genesis header's accumulated difficulty.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Adds a header's own difficulty to this score, producing the child's score.
    pub fn accumulate(self, difficulty: U256) -> Self {
        Self(self.0 + difficulty)
    }
}

impl Add<U256> for Score {
    type Output = Self;

    fn add(self, rhs: U256) -> Self {
        self.accumulate(rhs)
    }
}

impl From<U256> for Score {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Compact for Score {
    fn to_compact<B>(&self, buf: &mut B) -> usize
    where
        B: BufMut + AsMut<[u8]>,
    {
        let start_len = buf.remaining_mut();
        let be = self.0.to_be_bytes::<32>();
        let first_nonzero = be.iter().position(|&b| b != 0).unwrap_or(be.len());
        buf.put_slice(&be[first_nonzero..]);
        start_len - buf.remaining_mut()
    }

    fn from_compact(buf: &[u8], len: usize) -> (Self, &[u8]) {
        let (value_bytes, rest) = buf.split_at(len);
        let score = Self(U256::from_be_slice(value_bytes));
        (score, rest)
    }
}
