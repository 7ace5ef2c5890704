//! Async adapter over [`HeaderChainDb`] for callers that cannot block their
//! executor thread on MDBX I/O.

use crate::{
    db::HeaderChainDb,
    error::HeaderChainError,
    header::Header,
    traits::{AsyncHeaderChainWriter, HeaderChainWriter},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Runs [`HeaderChainDb`]'s reorg algorithm on a blocking-friendly executor
/// thread, so `persist`/`persist_chain` never suspend a caller's async task
/// on MDBX I/O. Wraps the same database handle the synchronous API uses —
/// there is exactly one implementation of the algorithm underneath both, and
/// metrics gating (`HeaderChainDb::with_metrics`) is inherited from it rather
/// than re-checked here: `persist`/`persist_chain` below delegate straight to
/// `HeaderChainWriter`'s already-gated methods, so this wrapper never records
/// a metric of its own.
#[derive(Debug, Clone)]
pub struct AsyncHeaderChainDb {
    inner: Arc<HeaderChainDb>,
}

impl AsyncHeaderChainDb {
    /// Wraps an existing [`HeaderChainDb`] handle for async use.
    pub fn new(inner: Arc<HeaderChainDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AsyncHeaderChainWriter for AsyncHeaderChainDb {
    async fn persist(&self, header: Header) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> {
        let inner = Arc::clone(&self.inner);
        join_blocking(move || inner.persist(header)).await
    }

    async fn persist_chain(
        &self,
        headers: Vec<Header>,
    ) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> {
        let inner = Arc::clone(&self.inner);
        join_blocking(move || inner.persist_chain(headers)).await
    }
}

/// Runs `f` on a blocking-friendly executor thread and flattens a task panic
/// into [`HeaderChainError::Corruption`].
async fn join_blocking<F>(f: F) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>
where
    F: FnOnce() -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| HeaderChainError::Corruption(format!("writer task panicked: {err}")))?
}
