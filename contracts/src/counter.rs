//! # Counter Contract
//!
//! The demo's "hello world": a single published `round` counter and one
//! operation that bumps it. No private state, no witnesses, no failure
//! modes — which makes it the right contract for smoke-testing the deploy
//! and invocation path end to end.

use serde::{Deserialize, Serialize};
use veil_runtime::Counter;

/// The counter's published ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterLedger {
    /// Number of increments performed since deployment.
    pub round: Counter,
}

/// The counter contract state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterContract {
    ledger: CounterLedger,
}

impl CounterContract {
    /// A fresh counter at round 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the contract from a persisted ledger.
    pub fn resume(ledger: CounterLedger) -> Self {
        CounterContract { ledger }
    }

    /// Read-only view of the published ledger.
    pub fn ledger(&self) -> &CounterLedger {
        &self.ledger
    }

    /// Advances the round by 1. Infallible; the counter saturates rather
    /// than wrapping.
    pub fn increment(&mut self) {
        self.ledger.round.increment(1);
    }

    /// The current round.
    pub fn round(&self) -> u64 {
        self.ledger.round.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(CounterContract::new().round(), 0);
    }

    #[test]
    fn each_increment_adds_exactly_one() {
        let mut c = CounterContract::new();
        for expected in 1..=5 {
            c.increment();
            assert_eq!(c.round(), expected);
        }
    }

    #[test]
    fn resume_preserves_round() {
        let mut c = CounterContract::new();
        c.increment();
        c.increment();
        let resumed = CounterContract::resume(*c.ledger());
        assert_eq!(resumed.round(), 2);
    }
}
