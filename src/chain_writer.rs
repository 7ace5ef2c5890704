//! The reorg engine: validates contiguity, accumulates scores, and decides
//! and performs canonical-chain head switches.

use crate::{
    codec::HeaderCodecCache,
    error::HeaderChainError,
    header::Header,
    provider::{CanonicalIndexProvider, HeaderStoreProvider},
    score::Score,
};
use reth_db_api::transaction::{DbTx, DbTxMut};

/// Runs `persist_chain`'s full algorithm against one open read-write
/// transaction. Shared by the synchronous [`crate::db::HeaderChainDb`] and,
/// through `tokio::task::spawn_blocking`, the asynchronous writer — the
/// algorithm itself lives in exactly one place. `cache` is threaded through to
/// every header lookup, most importantly the ancestor walk in phase 6, which
/// repeatedly re-decodes the same headers as it climbs toward the fork point.
pub(crate) fn persist_chain_with_tx<TX>(
    tx: &TX,
    headers: Vec<Header>,
    cache: Option<&HeaderCodecCache>,
) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>
where
    TX: DbTxMut + DbTx,
{
    // Phase 1 — structural validation. No writes have happened yet.
    if headers.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    for pair in headers.windows(2) {
        let (parent, child) = (&pair[0], &pair[1]);
        if child.parent_hash() != parent.hash() {
            return Err(HeaderChainError::ValidationError(format!(
                "header {} does not chain from header {}: parent_hash {} != {}",
                child.number(),
                parent.number(),
                child.parent_hash(),
                parent.hash(),
            )));
        }
    }

    let header_store = HeaderStoreProvider::new(tx);
    let canonical_index = CanonicalIndexProvider::new(tx);

    // Phase 2 — parent anchoring.
    let h0 = &headers[0];
    let is_genesis = h0.is_genesis();
    if !is_genesis && !header_store.header_exists(h0.parent_hash())? {
        return Err(HeaderChainError::ParentNotFound(h0.parent_hash()));
    }

    // Phase 3 — score seed.
    let mut running_score = if is_genesis {
        Score::ZERO
    } else {
        header_store.get_score(h0.parent_hash())?.ok_or_else(|| {
            HeaderChainError::Corruption(format!(
                "parent header {} exists but has no recorded score",
                h0.parent_hash()
            ))
        })?
    };

    // Phase 4 — write.
    for header in &headers {
        header_store.put_header(header, cache)?;
        running_score = running_score.accumulate(header.difficulty());
        header_store.put_score(header.hash(), running_score)?;
    }

    let tip = headers.last().expect("checked non-empty above");
    let tip_score = running_score;

    // Phase 5 — head decision, via an explicit optional-returning probe
    // instead of catching an "unset head" error.
    if let Some(head_hash) = canonical_index.try_get_head()? {
        let head_score = header_store.get_score(head_hash)?.ok_or_else(|| {
            HeaderChainError::Corruption(format!(
                "canonical head {head_hash} has no recorded score"
            ))
        })?;
        if tip_score <= head_score {
            return Ok((Vec::new(), Vec::new()));
        }
    }

    // Phase 6 — canonical switch.
    set_as_canonical_chain_head(tx, tip, cache)
}

/// Phase 6 in isolation: reassigns the canonical index to make `tip` the new
/// head, returning the newly canonical and displaced headers in ascending
/// block-number order.
fn set_as_canonical_chain_head<TX>(
    tx: &TX,
    tip: &Header,
    cache: Option<&HeaderCodecCache>,
) -> Result<(Vec<Header>, Vec<Header>), HeaderChainError>
where
    TX: DbTxMut + DbTx,
{
    let header_store = HeaderStoreProvider::new(tx);
    let canonical_index = CanonicalIndexProvider::new(tx);

    // 6.1 — find new ancestors, walking from `tip` back to the common
    // ancestor (or genesis), then reverse to ascending order.
    let mut new_canonical_desc = Vec::new();
    let mut current = tip.clone();
    loop {
        if let Some(existing_hash) = canonical_index.get_canonical_hash(current.number())? {
            if existing_hash == current.hash() {
                break;
            }
        }
        let is_genesis = current.is_genesis();
        let parent_hash = current.parent_hash();
        new_canonical_desc.push(current);
        if is_genesis {
            break;
        }
        current = header_store.get_header_by_hash(parent_hash, cache)?.ok_or_else(|| {
            HeaderChainError::Corruption(format!(
                "ancestor {parent_hash} referenced by a just-written header is missing"
            ))
        })?;
    }
    let mut new_canonical = new_canonical_desc;
    new_canonical.reverse();

    // 6.2 — find displaced headers, parallel in ascending order.
    let mut old_canonical = Vec::new();
    for h_new in &new_canonical {
        let Some(old_hash) = canonical_index.get_canonical_hash(h_new.number())? else {
            break;
        };
        let old_header = header_store.get_header_by_hash(old_hash, cache)?.ok_or_else(|| {
            HeaderChainError::Corruption(format!(
                "canonical index names {old_hash} at number {} but no header is stored",
                h_new.number()
            ))
        })?;
        old_canonical.push(old_header);
    }

    // 6.3 — install new canonical mapping.
    for h_new in &new_canonical {
        canonical_index.set_canonical_at(h_new.number(), h_new.hash())?;
    }

    // 6.4 — install head.
    canonical_index.set_head(tip.hash())?;

    Ok((new_canonical, old_canonical))
}
