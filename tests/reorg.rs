//! End-to-end reorg scenarios against the public API.

use alloy_primitives::{Address, Bytes, B256, U256};
use reth_header_chain::{
    HeaderChainDb, HeaderChainError, HeaderChainReader, HeaderChainWriter, HeaderData, Score,
    ALL_ZERO_HASH,
};
use tempfile::TempDir;

fn header(parent_hash: B256, number: u64, difficulty: u64) -> reth_header_chain::Header {
    reth_header_chain::Header::new(HeaderData {
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

/// Keeps the backing temp directory alive for as long as the returned handle.
struct TestDb {
    _dir: TempDir,
    db: HeaderChainDb,
}

impl std::ops::Deref for TestDb {
    type Target = HeaderChainDb;
    fn deref(&self) -> &HeaderChainDb {
        &self.db
    }
}

fn open_db() -> TestDb {
    let dir = TempDir::new().expect("tempdir");
    let db = HeaderChainDb::new(&dir.path().join("header_chain")).expect("open db");
    TestDb { _dir: dir, db }
}

#[test]
fn scenario_1_bootstrap() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 17);

    let (new, old) = db.persist(genesis.clone()).expect("bootstrap");
    assert_eq!(new, vec![genesis.clone()]);
    assert!(old.is_empty());
    assert_eq!(db.get_canonical_head().unwrap(), genesis);
    assert_eq!(db.get_score(genesis.hash()).unwrap(), Score::ZERO.accumulate(U256::from(17_u64)));
}

#[test]
fn scenario_2_linear_extension() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 17);
    db.persist(genesis.clone()).unwrap();

    let a = header(genesis.hash(), 1, 20);
    let b = header(a.hash(), 2, 21);
    let (new, old) = db.persist_chain(vec![a.clone(), b.clone()]).expect("extend");

    assert_eq!(new, vec![a, b.clone()]);
    assert!(old.is_empty());
    assert_eq!(db.get_canonical_head().unwrap(), b);
    assert_eq!(db.get_score(b.hash()).unwrap(), Score(U256::from(58_u64)));
}

#[test]
fn scenario_3_losing_fork() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 17);
    db.persist(genesis.clone()).unwrap();
    let a = header(genesis.hash(), 1, 20);
    let b = header(a.hash(), 2, 21);
    db.persist_chain(vec![a, b.clone()]).unwrap();

    let a_prime = header(genesis.hash(), 1, 10);
    let b_prime = header(a_prime.hash(), 2, 10);
    let (new, old) = db.persist_chain(vec![a_prime.clone(), b_prime.clone()]).expect("fork");

    assert!(new.is_empty());
    assert!(old.is_empty());
    assert_eq!(db.get_canonical_head().unwrap(), b);
    assert_eq!(db.get_score(b_prime.hash()).unwrap(), Score(U256::from(37_u64)));
    assert_eq!(db.get_header_by_hash(a_prime.hash()).unwrap(), a_prime);
    assert_eq!(db.get_header_by_hash(b_prime.hash()).unwrap(), b_prime);
}

#[test]
fn scenario_4_winning_reorg() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 17);
    db.persist(genesis.clone()).unwrap();
    let a = header(genesis.hash(), 1, 20);
    let b = header(a.hash(), 2, 21);
    db.persist_chain(vec![a.clone(), b.clone()]).unwrap();

    let a_prime = header(genesis.hash(), 1, 10);
    let b_prime = header(a_prime.hash(), 2, 10);
    db.persist_chain(vec![a_prime.clone(), b_prime.clone()]).unwrap();

    let c_prime = header(b_prime.hash(), 3, 100);
    let (new, old) = db.persist(c_prime.clone()).expect("reorg");

    assert_eq!(new, vec![a_prime.clone(), b_prime.clone(), c_prime.clone()]);
    assert_eq!(old, vec![a, b]);
    assert_eq!(db.get_canonical_head().unwrap(), c_prime);
    assert_eq!(db.get_canonical_hash(1).unwrap(), a_prime.hash());
    assert_eq!(db.get_canonical_hash(2).unwrap(), b_prime.hash());
    assert_eq!(db.get_canonical_hash(3).unwrap(), c_prime.hash());

    // Open question: the old chain was not longer than the new one here, so
    // there is no stale number above the new head to probe — invariant 2
    // holds exactly up to the new head's own number.
    assert_eq!(db.get_canonical_header_by_number(3).unwrap(), c_prime);
}

#[test]
fn scenario_5_non_contiguous_input_rejected() {
    let db = open_db();
    let x = header(ALL_ZERO_HASH, 0, 1);
    let z = header(B256::repeat_byte(0xCD), 1, 1);

    let err = db.persist_chain(vec![x.clone(), z]).unwrap_err();
    assert!(matches!(err, HeaderChainError::ValidationError(_)));
    assert!(!db.header_exists(x.hash()).unwrap());
    assert!(db.try_get_head().unwrap().is_none());
}

#[test]
fn scenario_6_unknown_parent_rejected() {
    let db = open_db();
    let y = header(B256::repeat_byte(0xEF), 5, 1);
    let err = db.persist(y).unwrap_err();
    assert!(matches!(err, HeaderChainError::ParentNotFound(_)));
    assert!(db.try_get_head().unwrap().is_none());
}

#[test]
fn stale_canonical_mapping_above_a_shorter_new_head_survives_as_an_orphan() {
    // A longer losing chain that is later beaten by a *shorter* winning
    // chain leaves the higher-numbered
    // canonical-index rows in place rather than deleting them.
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 17);
    db.persist(genesis.clone()).unwrap();

    let a = header(genesis.hash(), 1, 1);
    let b = header(a.hash(), 2, 1);
    let c = header(b.hash(), 3, 1);
    db.persist_chain(vec![a, b, c.clone()]).unwrap();
    assert_eq!(db.get_canonical_hash(3).unwrap(), c.hash());

    let a_prime = header(genesis.hash(), 1, 1000);
    let (new, _old) = db.persist(a_prime.clone()).expect("short heavy fork wins");
    assert_eq!(new, vec![a_prime.clone()]);
    assert_eq!(db.get_canonical_head().unwrap(), a_prime);

    // Number 3 is still mapped to the orphaned old tip's hash; it was never
    // cleared by the switch to the shorter, heavier chain.
    assert_eq!(db.get_canonical_hash(3).unwrap(), c.hash());
}

#[test]
fn invariant_4_equal_score_does_not_switch_head() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 10);
    db.persist(genesis.clone()).unwrap();

    let a = header(genesis.hash(), 1, 5);
    db.persist(a.clone()).unwrap();

    let a_prime = header(genesis.hash(), 1, 5);
    let (new, old) = db.persist(a_prime).expect("equal score");
    assert!(new.is_empty());
    assert!(old.is_empty());
    assert_eq!(db.get_canonical_head().unwrap(), a);
}

#[test]
fn invariant_6_cache_transparency_across_repeated_reads() {
    let db = open_db();
    let genesis = header(ALL_ZERO_HASH, 0, 3);
    db.persist(genesis.clone()).unwrap();

    let first = db.get_header_by_hash(genesis.hash()).unwrap();
    let second = db.get_header_by_hash(genesis.hash()).unwrap();
    assert_eq!(first, second);
}
