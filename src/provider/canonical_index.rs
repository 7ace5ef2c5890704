//! Typed read/write access to the canonical number-to-hash index and head pointer.

use crate::{
    error::HeaderChainError,
    models::{CanonicalHeaders, HeadPointer, HEAD_KEY},
};
use alloy_primitives::B256;
use derive_more::Constructor;
use reth_db_api::transaction::{DbTx, DbTxMut};
use tracing::error;

/// Read/write access to the `CanonicalHeaders` and `HeadPointer` tables for
/// one transaction.
#[derive(Debug, Constructor)]
pub(crate) struct CanonicalIndexProvider<'tx, TX> {
    tx: &'tx TX,
}

impl<TX> CanonicalIndexProvider<'_, TX>
where
    TX: DbTx,
{
    /// Looks up the canonical hash at a block number, if the chain reaches
    /// that height.
    pub(crate) fn get_canonical_hash(
        &self,
        number: u64,
    ) -> Result<Option<B256>, HeaderChainError> {
        self.tx.get::<CanonicalHeaders>(number).inspect_err(|err| {
            error!(target: "header_chain", number, %err, "failed to read canonical index");
        }).map_err(HeaderChainError::from)
    }

    /// Returns the hash of the current canonical head, or `None` if the
    /// database is empty. This is the explicit probe form used by the reorg
    /// algorithm instead of treating an unset head as an error.
    pub(crate) fn try_get_head(&self) -> Result<Option<B256>, HeaderChainError> {
        self.tx.get::<HeadPointer>(HEAD_KEY).inspect_err(|err| {
            error!(target: "header_chain", %err, "failed to read canonical head pointer");
        }).map_err(HeaderChainError::from)
    }
}

impl<TX> CanonicalIndexProvider<'_, TX>
where
    TX: DbTxMut + DbTx,
{
    /// Installs `hash` as the canonical header at `number`, overwriting
    /// whatever hash (if any) was previously recorded there.
    pub(crate) fn set_canonical_at(
        &self,
        number: u64,
        hash: B256,
    ) -> Result<(), HeaderChainError> {
        self.tx.put::<CanonicalHeaders>(number, hash).inspect_err(|err| {
            error!(target: "header_chain", number, %hash, %err, "failed to write canonical index");
        })?;
        Ok(())
    }

    /// Removes the canonical mapping at `number`, leaving the row absent.
    /// Used when a reorg shortens the canonical chain's effective length at
    /// the tip; displaced headers below the fork point are left as-is.
    pub(crate) fn clear_canonical_at(&self, number: u64) -> Result<(), HeaderChainError> {
        self.tx.delete::<CanonicalHeaders>(number, None).inspect_err(|err| {
            error!(target: "header_chain", number, %err, "failed to clear canonical index");
        })?;
        Ok(())
    }

    /// Points the canonical head at `hash`.
    pub(crate) fn set_head(&self, hash: B256) -> Result<(), HeaderChainError> {
        self.tx.put::<HeadPointer>(HEAD_KEY, hash).inspect_err(|err| {
            error!(target: "header_chain", %hash, %err, "failed to write canonical head pointer");
        })?;
        Ok(())
    }
}
