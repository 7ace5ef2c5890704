//! Top-level database handle for the header chain core.

use crate::{
    chain_writer::persist_chain_with_tx,
    codec::HeaderCodecCache,
    error::HeaderChainError,
    header::Header,
    metrics::{observe_metrics_for_result, Metrics},
    models::Tables,
    provider::{CanonicalIndexProvider, HeaderStoreProvider},
    score::Score,
    traits::{HeaderChainReader, HeaderChainWriter},
};
use alloy_primitives::B256;
use reth_db::{
    mdbx::{init_db_for, DatabaseArguments},
    DatabaseEnv,
};
use reth_db_api::database::Database;
use std::path::Path;

/// Manages the database environment for the header chain core.
///
/// Wraps a single [`DatabaseEnv`]; every public method opens its own
/// transaction and delegates to the per-table providers. Also owns the
/// process-local [`HeaderCodecCache`] (component B), shared across all
/// transactions opened through this handle.
#[derive(Debug)]
pub struct HeaderChainDb {
    metrics_enabled: bool,
    env: DatabaseEnv,
    header_cache: HeaderCodecCache,
}

impl HeaderChainDb {
    /// Creates or opens a header chain database at `path`.
    pub fn new(path: &Path) -> Result<Self, HeaderChainError> {
        let env = init_db_for::<_, Tables>(path, DatabaseArguments::default())?;
        Ok(Self { metrics_enabled: false, env, header_cache: HeaderCodecCache::new() })
    }

    /// Enables metrics recording on this handle.
    pub fn with_metrics(mut self) -> Self {
        self.metrics_enabled = true;
        Metrics::init();
        self
    }

    fn observe_call<T, E, F: FnOnce() -> Result<T, E>>(
        &self,
        name: &'static str,
        f: F,
    ) -> Result<T, E> {
        if self.metrics_enabled {
            observe_metrics_for_result!(
                Metrics::REQUESTS_SUCCESS_TOTAL,
                Metrics::REQUESTS_ERROR_TOTAL,
                Metrics::REQUEST_DURATION_SECONDS,
                name,
                f()
            )
        } else {
            f()
        }
    }
}

impl HeaderChainReader for HeaderChainDb {
    fn get_header_by_hash(&self, hash: B256) -> Result<Header, HeaderChainError> {
        self.observe_call(Metrics::METHOD_GET_HEADER_BY_HASH, || {
            self.env.view(|tx| {
                HeaderStoreProvider::new(tx).get_header_by_hash(hash, Some(&self.header_cache))
            })
        })??
        .ok_or(HeaderChainError::HeaderNotFound(hash))
    }

    fn header_exists(&self, hash: B256) -> Result<bool, HeaderChainError> {
        self.observe_call(Metrics::METHOD_HEADER_EXISTS, || {
            self.env.view(|tx| HeaderStoreProvider::new(tx).header_exists(hash))
        })?
    }

    fn get_score(&self, hash: B256) -> Result<Score, HeaderChainError> {
        self.observe_call(Metrics::METHOD_GET_SCORE, || {
            self.env.view(|tx| HeaderStoreProvider::new(tx).get_score(hash))
        })??
        .ok_or(HeaderChainError::HeaderNotFound(hash))
    }

    fn get_canonical_hash(&self, number: u64) -> Result<B256, HeaderChainError> {
        self.observe_call(Metrics::METHOD_GET_CANONICAL_HASH, || {
            self.env.view(|tx| CanonicalIndexProvider::new(tx).get_canonical_hash(number))
        })??
        .ok_or(HeaderChainError::CanonicalEntryNotFound(number))
    }

    fn get_canonical_header_by_number(&self, number: u64) -> Result<Header, HeaderChainError> {
        self.observe_call(Metrics::METHOD_GET_CANONICAL_HEADER_BY_NUMBER, || {
            self.env.view(|tx| {
                let Some(hash) = CanonicalIndexProvider::new(tx).get_canonical_hash(number)?
                else {
                    return Ok(None);
                };
                HeaderStoreProvider::new(tx).get_header_by_hash(hash, Some(&self.header_cache))
            })
        })??
        .ok_or(HeaderChainError::CanonicalEntryNotFound(number))
    }

    fn get_canonical_head(&self) -> Result<Header, HeaderChainError> {
        self.observe_call(Metrics::METHOD_GET_CANONICAL_HEAD, || {
            self.env.view(|tx| {
                let Some(head_hash) = CanonicalIndexProvider::new(tx).try_get_head()? else {
                    return Ok(None);
                };
                HeaderStoreProvider::new(tx)
                    .get_header_by_hash(head_hash, Some(&self.header_cache))
            })
        })??
        .ok_or(HeaderChainError::CanonicalHeadNotFound)
    }

    fn try_get_head(&self) -> Result<Option<Header>, HeaderChainError> {
        self.observe_call(Metrics::METHOD_TRY_GET_HEAD, || {
            self.env.view(|tx| {
                let Some(head_hash) = CanonicalIndexProvider::new(tx).try_get_head()? else {
                    return Ok(None);
                };
                HeaderStoreProvider::new(tx)
                    .get_header_by_hash(head_hash, Some(&self.header_cache))
            })
        })?
    }
}

impl HeaderChainWriter for HeaderChainDb {
    fn persist(&self, header: Header) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> {
        self.observe_call(Metrics::METHOD_PERSIST, || {
            self.env.update(|tx| persist_chain_with_tx(tx, vec![header], Some(&self.header_cache)))
        })?
    }

    fn persist_chain(
        &self,
        headers: Vec<Header>,
    ) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError> {
        self.observe_call(Metrics::METHOD_PERSIST_CHAIN, || {
            self.env.update(|tx| persist_chain_with_tx(tx, headers, Some(&self.header_cache)))
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HeaderData, ALL_ZERO_HASH};
    use alloy_primitives::{Address, Bytes, U256};
    use tempfile::TempDir;

    fn header(parent_hash: B256, number: u64, difficulty: u64) -> Header {
        Header::new(HeaderData {
            parent_hash,
            number,
            difficulty: U256::from(difficulty),
            beneficiary: Address::ZERO,
            state_root: B256::ZERO,
            timestamp: number,
            extra_data: Bytes::new(),
            gas_limit: 30_000_000,
            gas_used: 0,
        })
    }

    fn open_db() -> HeaderChainDb {
        let dir = TempDir::new().expect("tempdir");
        HeaderChainDb::new(&dir.path().join("header_chain")).expect("open db")
    }

    #[test]
    fn empty_persist_chain_is_a_no_op() {
        let db = open_db();
        let (new, old) = db.persist_chain(vec![]).expect("persist empty");
        assert!(new.is_empty());
        assert!(old.is_empty());
        assert_eq!(db.try_get_head().unwrap(), None);
    }

    #[test]
    fn bootstrap_installs_genesis_as_head() {
        let db = open_db();
        let genesis = header(ALL_ZERO_HASH, 0, 17);

        let (new, old) = db.persist(genesis.clone()).expect("persist genesis");
        assert_eq!(new, vec![genesis.clone()]);
        assert!(old.is_empty());

        let head = db.get_canonical_head().expect("head");
        assert_eq!(head, genesis);
        assert_eq!(db.get_score(genesis.hash()).unwrap(), Score::ZERO.accumulate(U256::from(17_u64)));
    }

    #[test]
    fn linear_extension_replaces_head() {
        let db = open_db();
        let genesis = header(ALL_ZERO_HASH, 0, 17);
        db.persist(genesis.clone()).expect("genesis");

        let a = header(genesis.hash(), 1, 20);
        let b = header(a.hash(), 2, 21);
        let (new, old) = db.persist_chain(vec![a.clone(), b.clone()]).expect("extend");

        assert_eq!(new, vec![a.clone(), b.clone()]);
        assert!(old.is_empty());
        assert_eq!(db.get_canonical_head().unwrap(), b);
        assert_eq!(db.get_score(b.hash()).unwrap(), Score(U256::from(58_u64)));
    }

    #[test]
    fn losing_fork_does_not_reorg() {
        let db = open_db();
        let genesis = header(ALL_ZERO_HASH, 0, 17);
        db.persist(genesis.clone()).expect("genesis");
        let a = header(genesis.hash(), 1, 20);
        let b = header(a.hash(), 2, 21);
        db.persist_chain(vec![a.clone(), b.clone()]).expect("extend");

        let a_prime = header(genesis.hash(), 1, 10);
        let b_prime = header(a_prime.hash(), 2, 10);
        let (new, old) =
            db.persist_chain(vec![a_prime.clone(), b_prime.clone()]).expect("losing fork");

        assert!(new.is_empty());
        assert!(old.is_empty());
        assert_eq!(db.get_canonical_head().unwrap(), b);
        // both forks remain readable by hash.
        assert_eq!(db.get_header_by_hash(b_prime.hash()).unwrap(), b_prime);
    }

    #[test]
    fn winning_reorg_switches_head_and_reports_both_sides() {
        let db = open_db();
        let genesis = header(ALL_ZERO_HASH, 0, 17);
        db.persist(genesis.clone()).expect("genesis");
        let a = header(genesis.hash(), 1, 20);
        let b = header(a.hash(), 2, 21);
        db.persist_chain(vec![a.clone(), b.clone()]).expect("extend");

        let a_prime = header(genesis.hash(), 1, 10);
        let b_prime = header(a_prime.hash(), 2, 10);
        db.persist_chain(vec![a_prime.clone(), b_prime.clone()]).expect("losing fork");

        let c_prime = header(b_prime.hash(), 3, 100);
        let (new, old) = db.persist(c_prime.clone()).expect("winning reorg");

        assert_eq!(new, vec![a_prime.clone(), b_prime.clone(), c_prime.clone()]);
        assert_eq!(old, vec![a.clone(), b.clone()]);
        assert_eq!(db.get_canonical_head().unwrap(), c_prime);
        assert_eq!(db.get_canonical_hash(1).unwrap(), a_prime.hash());
        assert_eq!(db.get_canonical_hash(2).unwrap(), b_prime.hash());
        assert_eq!(db.get_canonical_hash(3).unwrap(), c_prime.hash());
    }

    #[test]
    fn non_contiguous_chain_is_rejected_before_any_write() {
        let db = open_db();
        let x = header(ALL_ZERO_HASH, 0, 1);
        let z = header(B256::repeat_byte(0xFF), 1, 1);

        let err = db.persist_chain(vec![x.clone(), z]).unwrap_err();
        assert!(matches!(err, HeaderChainError::ValidationError(_)));
        assert!(!db.header_exists(x.hash()).unwrap());
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let db = open_db();
        let y = header(B256::repeat_byte(0xAB), 5, 1);
        let err = db.persist(y).unwrap_err();
        assert!(matches!(err, HeaderChainError::ParentNotFound(_)));
    }
}
