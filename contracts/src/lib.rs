//! # VEIL Demo Contracts
//!
//! The two contract state machines behind the VEIL demo dApp:
//!
//! - **NFT Royalty Registry** — mint/transfer/lookup over a registry of
//!   32-byte token ids, with an ownership guard on transfer and a royalty
//!   percentage kept in *private* state, off the published ledger.
//! - **Counter** — a single public `round` counter with an `increment`
//!   operation. The smallest possible contract; useful as a smoke test for
//!   the whole deploy/invoke path.
//!
//! ## Design Principles
//!
//! 1. Contracts are pure, synchronous state-transition functions: given
//!    (state, operation, arguments) they deterministically produce a new
//!    state or a precondition failure. No I/O, no clocks, no threads.
//! 2. Every operation is atomic — it commits all of its writes or none.
//!    Guards run before the first write, so a failed operation leaves the
//!    ledger byte-identical.
//! 3. Published and private state are kept in separate types and move
//!    through separate channels. Private state is only ever touched by
//!    witness functions.
//! 4. Failure modes are explicit enum variants (`thiserror`), not panics.

pub mod counter;
pub mod nft_royalty;
