//! The bounded header decode cache.

mod cache;
pub use cache::HeaderCodecCache;
