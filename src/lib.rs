//! Header persistence, score accumulation, and canonical-chain reorg engine
//! for an Ethereum-compatible node.
//!
//! The entry point is [`HeaderChainDb`] (synchronous) or [`AsyncHeaderChainDb`]
//! (suspends on a blocking-friendly executor thread). Both share the same
//! reorg algorithm; see [`traits::HeaderChainWriter::persist_chain`].

mod async_writer;
mod chain_writer;
mod codec;
mod db;
mod error;
mod header;
mod metrics;
mod models;
mod provider;
mod score;
mod traits;

pub use async_writer::AsyncHeaderChainDb;
pub use codec::HeaderCodecCache;
pub use db::HeaderChainDb;
pub use error::HeaderChainError;
pub use header::{Header, HeaderData, ALL_ZERO_HASH};
pub use score::Score;
pub use traits::{AsyncHeaderChainWriter, HeaderChainReader, HeaderChainWriter};
