//! # NFT Royalty Registry Contract
//!
//! A registry of NFTs keyed by caller-chosen 32-byte token ids. The
//! published ledger records who owns and who created each token; the
//! royalty percentage set at mint time lives only in the minter's private
//! state and never reaches the ledger.
//!
//! Per-token lifecycle:
//!
//! ```text
//! Unminted --mint--> Owned(creator) --transfer--> Owned(receiver) --...
//! ```
//!
//! There is no burn: owner entries are overwritten, never removed.
//!
//! ## Characterization notes
//!
//! Two behaviors are preserved from the deployed contract exactly as they
//! are, quirks included:
//!
//! - `next_token_id` is incremented on every mint but never consulted —
//!   token ids are supplied by the caller, and the counter plays no part in
//!   naming or validating them.
//! - Minting an id that already exists is not rejected; the new mint
//!   overwrites the owner and creator entries (and bumps the counter
//!   again).
//!
//! Both are covered by tests so that a future redesign changes them on
//! purpose, not by accident.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use veil_runtime::{Bytes32, Counter, LedgerMap, WitnessContext};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Precondition violations reported by registry operations.
///
/// Both variants are non-retryable: the caller must change its inputs (or
/// the world must change) before the operation can succeed. A failed
/// operation commits nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NftError {
    /// `transfer` was invoked with a `sender` that is not the recorded
    /// owner. Also raised when the token id has never been minted: an
    /// absent entry cannot equal any sender, so the guard fails closed.
    #[error("not the owner: token {token_id} cannot be transferred by {sender}")]
    OwnershipViolation {
        /// The token the transfer named.
        token_id: Bytes32,
        /// The party that claimed to be the owner.
        sender: Bytes32,
    },

    /// A lookup named a token id with no entry. Absence is an error, not a
    /// default value.
    #[error("token not found: {token_id}")]
    NotFound {
        /// The unminted token id.
        token_id: Bytes32,
    },
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The published ledger state of the registry, visible to all parties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NftLedger {
    /// Mint counter. Incremented by 1 on every mint as a side effect;
    /// never used to assign or validate token ids.
    pub next_token_id: Counter,
    /// Token id → current owner. One entry per minted id.
    pub nft_owner: LedgerMap<Bytes32, Bytes32>,
    /// Token id → creator. Written at mint, immutable thereafter.
    pub nft_creator: LedgerMap<Bytes32, Bytes32>,
}

/// The minter's private state. Held locally, never published.
///
/// A single slot: each mint overwrites it with that mint's royalty. The
/// deployed contract stores exactly one scalar here, not a per-token map,
/// so "most recent mint's royalty" is the intended reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NftPrivateState {
    /// Royalty rate of the most recent mint. Conceptually a percentage in
    /// [0, 100]; the contract does not range-check it.
    pub royalty_pct: u64,
}

// ---------------------------------------------------------------------------
// Witnesses
// ---------------------------------------------------------------------------

/// The registry's private-state surface.
///
/// The contract calls [`set_royalty`](Self::set_royalty) during `mint`; the
/// witness decides what the next private state looks like. Implementations
/// get a read-only view of the ledger and the current private state, and
/// return the new private state plus an auxiliary output (unused here,
/// present to keep the witness signature uniform).
pub trait RoyaltyWitnesses {
    /// Produces the private state that results from recording `pct`.
    fn set_royalty(
        &self,
        ctx: WitnessContext<'_, NftLedger, NftPrivateState>,
        pct: u64,
    ) -> (NftPrivateState, ());
}

/// The standard witness table: stores `pct` into the single royalty slot,
/// discarding whatever was there.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWitnesses;

impl RoyaltyWitnesses for StandardWitnesses {
    fn set_royalty(
        &self,
        _ctx: WitnessContext<'_, NftLedger, NftPrivateState>,
        pct: u64,
    ) -> (NftPrivateState, ()) {
        (NftPrivateState { royalty_pct: pct }, ())
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The NFT royalty registry state machine.
///
/// Generic over its witness table, the way the deployed contract is
/// constructed with one: swap in a different [`RoyaltyWitnesses`] to change
/// how private state reacts to mints without touching ledger semantics.
#[derive(Debug, Clone)]
pub struct NftRoyaltyContract<W = StandardWitnesses> {
    ledger: NftLedger,
    private_state: NftPrivateState,
    witnesses: W,
}

impl NftRoyaltyContract<StandardWitnesses> {
    /// A fresh registry: counter at zero, both maps empty, royalty slot 0.
    pub fn new() -> Self {
        Self::with_witnesses(StandardWitnesses)
    }
}

impl Default for NftRoyaltyContract<StandardWitnesses> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: RoyaltyWitnesses> NftRoyaltyContract<W> {
    /// A fresh registry with a caller-supplied witness table.
    pub fn with_witnesses(witnesses: W) -> Self {
        NftRoyaltyContract {
            ledger: NftLedger::default(),
            private_state: NftPrivateState::default(),
            witnesses,
        }
    }

    /// Rebuilds a registry from previously persisted state halves.
    pub fn resume(ledger: NftLedger, private_state: NftPrivateState, witnesses: W) -> Self {
        NftRoyaltyContract {
            ledger,
            private_state,
            witnesses,
        }
    }

    /// Read-only view of the published ledger.
    pub fn ledger(&self) -> &NftLedger {
        &self.ledger
    }

    /// Read-only view of the private state.
    pub fn private_state(&self) -> &NftPrivateState {
        &self.private_state
    }

    /// Splits the contract back into its two state halves, for persistence.
    pub fn into_parts(self) -> (NftLedger, NftPrivateState) {
        (self.ledger, self.private_state)
    }

    /// Mints a token: `creator` becomes both creator and initial owner of
    /// `token_id`, and `secret_royalty` is recorded in private state via
    /// the `set_royalty` witness.
    ///
    /// No uniqueness precondition: minting an existing id overwrites its
    /// owner and creator entries. The mint counter is bumped either way.
    pub fn mint(&mut self, token_id: Bytes32, creator: Bytes32, secret_royalty: u64) {
        self.ledger.next_token_id.increment(1);
        self.ledger.nft_owner.insert(token_id, creator);
        self.ledger.nft_creator.insert(token_id, creator);

        let ctx = WitnessContext::new(&self.ledger, &self.private_state);
        let (next_private, ()) = self.witnesses.set_royalty(ctx, secret_royalty);
        self.private_state = next_private;
    }

    /// Transfers `token_id` from `sender` to `receiver`.
    ///
    /// The recorded owner must equal `sender` byte-for-byte. The guard runs
    /// before the write, so a rejected transfer mutates nothing. The
    /// creator entry is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`NftError::OwnershipViolation`] when `sender` is not the
    /// recorded owner, or when the token id has never been minted.
    pub fn transfer(
        &mut self,
        token_id: Bytes32,
        sender: Bytes32,
        receiver: Bytes32,
    ) -> Result<(), NftError> {
        match self.ledger.nft_owner.lookup(&token_id) {
            Some(owner) if *owner == sender => {
                self.ledger.nft_owner.insert(token_id, receiver);
                Ok(())
            }
            _ => Err(NftError::OwnershipViolation { token_id, sender }),
        }
    }

    /// Returns the current owner of `token_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NftError::NotFound`] when the token id has never been
    /// minted.
    pub fn get_owner(&self, token_id: Bytes32) -> Result<Bytes32, NftError> {
        self.ledger
            .nft_owner
            .lookup(&token_id)
            .copied()
            .ok_or(NftError::NotFound { token_id })
    }

    /// Returns the creator of `token_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NftError::NotFound`] when the token id has never been
    /// minted.
    pub fn get_creator(&self, token_id: Bytes32) -> Result<Bytes32, NftError> {
        self.ledger
            .nft_creator
            .lookup(&token_id)
            .copied()
            .ok_or(NftError::NotFound { token_id })
    }
}
