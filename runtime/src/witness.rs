//! # Witness Calling Convention
//!
//! Witness functions are the only doorway between a contract and its
//! private state: given a read-only view of the published ledger and the
//! current private state, a witness returns the next private state plus an
//! auxiliary output. The private state never appears on the ledger and is
//! never part of the published state transition.

/// The context handed to a witness function.
///
/// `L` is the contract's published ledger type, `PS` its private state
/// type. Both are borrowed read-only; a witness produces a *new* private
/// state rather than mutating in place, which keeps the update atomic with
/// the rest of the operation.
#[derive(Debug)]
pub struct WitnessContext<'a, L, PS> {
    /// Read-only view of the published ledger state.
    pub ledger: &'a L,
    /// The private state as of the start of the operation.
    pub private_state: &'a PS,
}

impl<'a, L, PS> WitnessContext<'a, L, PS> {
    /// Assembles a context from borrows of the two state halves.
    pub fn new(ledger: &'a L, private_state: &'a PS) -> Self {
        WitnessContext {
            ledger,
            private_state,
        }
    }
}
