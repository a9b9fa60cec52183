//! # VEIL Contract Runtime
//!
//! The small, dependency-light substrate the VEIL contracts are written
//! against. On the real platform this role is played by the proving
//! runtime: contracts manipulate their published state through a typed
//! ledger view, and reach private data only through witness functions.
//! Here the same two surfaces are provided as plain Rust types, so the
//! contracts remain pure, synchronous state-transition functions with no
//! I/O and no proving machinery.
//!
//! - **types** — fixed-width 32-byte identifiers with exact byte equality.
//! - **ledger** — the published-state ADTs: a monotonic counter cell and an
//!   insert-or-overwrite map.
//! - **witness** — the calling convention for private-state functions.

pub mod ledger;
pub mod types;
pub mod witness;

pub use ledger::{Counter, LedgerMap};
pub use types::Bytes32;
pub use witness::WitnessContext;
