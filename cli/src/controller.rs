//! # Contract Controller
//!
//! The harness-side wrapper around deployed instances: each operation loads
//! the instance from the store, applies the state transition, persists the
//! result, and broadcasts an event for any subscribers. This is the
//! command/query surface the subcommands (and the demo's live event feed)
//! talk to — the contracts themselves stay pure and know nothing about
//! files or channels.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use veil_runtime::Bytes32;

use crate::store::{ContractKind, Store};

/// Broadcast channel capacity for contract events. 256 is large enough to
/// absorb a full demo run before any subscriber is polled.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something observable that happened to a deployed instance.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// A new instance was deployed.
    Deployed {
        kind: ContractKind,
    },
    /// A token was minted (creator becomes initial owner).
    Minted {
        token_id: Bytes32,
        creator: Bytes32,
    },
    /// A token changed owner.
    Transferred {
        token_id: Bytes32,
        from: Bytes32,
        to: Bytes32,
    },
    /// The counter advanced.
    Incremented {
        round: u64,
    },
}

/// A timestamped contract event.
#[derive(Debug, Clone)]
pub struct Event {
    /// When the harness applied the operation.
    pub at: DateTime<Utc>,
    /// The instance the event concerns.
    pub address: Bytes32,
    /// What happened.
    pub kind: EventKind,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let addr = &self.address.to_hex()[..8];
        match &self.kind {
            EventKind::Deployed { kind } => {
                write!(f, "[{}] {}… deployed ({})", self.at.format("%H:%M:%S"), addr, kind)
            }
            EventKind::Minted { token_id, creator } => write!(
                f,
                "[{}] {}… minted {} by {}",
                self.at.format("%H:%M:%S"),
                addr,
                token_id,
                creator
            ),
            EventKind::Transferred { token_id, from, to } => write!(
                f,
                "[{}] {}… transferred {} from {} to {}",
                self.at.format("%H:%M:%S"),
                addr,
                token_id,
                from,
                to
            ),
            EventKind::Incremented { round } => write!(
                f,
                "[{}] {}… incremented to round {}",
                self.at.format("%H:%M:%S"),
                addr,
                round
            ),
        }
    }
}

/// Drives deployed instances: load → transition → persist → notify.
pub struct Controller {
    store: Store,
    events: broadcast::Sender<Event>,
}

impl Controller {
    /// Wraps a store.
    pub fn new(store: Store) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Controller { store, events }
    }

    /// Subscribes to the event feed. Events emitted after this call are
    /// delivered to the returned receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    fn emit(&self, address: Bytes32, kind: EventKind) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.events.send(Event {
            at: Utc::now(),
            address,
            kind,
        });
    }

    /// Deploys a fresh instance and returns its address.
    pub fn deploy(&self, kind: ContractKind) -> Result<Bytes32> {
        let address = self.store.deploy(kind)?;
        tracing::info!(%address, %kind, "contract deployed");
        self.emit(address, EventKind::Deployed { kind });
        Ok(address)
    }

    /// Mints a token on an NFT registry instance.
    pub fn mint(
        &self,
        address: Bytes32,
        token_id: Bytes32,
        creator: Bytes32,
        royalty_pct: u64,
    ) -> Result<()> {
        let mut contract = self.store.load_nft(address)?;
        contract.mint(token_id, creator, royalty_pct);
        self.store.save_nft(address, &contract)?;
        tracing::info!(%address, %token_id, %creator, "token minted");
        self.emit(address, EventKind::Minted { token_id, creator });
        Ok(())
    }

    /// Transfers a token between parties. The rejected case persists
    /// nothing — the error surfaces before any write.
    pub fn transfer(
        &self,
        address: Bytes32,
        token_id: Bytes32,
        sender: Bytes32,
        receiver: Bytes32,
    ) -> Result<()> {
        let mut contract = self.store.load_nft(address)?;
        contract.transfer(token_id, sender, receiver)?;
        self.store.save_nft(address, &contract)?;
        tracing::info!(%address, %token_id, %sender, %receiver, "token transferred");
        self.emit(
            address,
            EventKind::Transferred {
                token_id,
                from: sender,
                to: receiver,
            },
        );
        Ok(())
    }

    /// The current owner of a token.
    pub fn owner(&self, address: Bytes32, token_id: Bytes32) -> Result<Bytes32> {
        Ok(self.store.load_nft(address)?.get_owner(token_id)?)
    }

    /// The creator of a token.
    pub fn creator(&self, address: Bytes32, token_id: Bytes32) -> Result<Bytes32> {
        Ok(self.store.load_nft(address)?.get_creator(token_id)?)
    }

    /// Advances a counter instance and returns the new round.
    pub fn increment(&self, address: Bytes32) -> Result<u64> {
        let mut contract = self.store.load_counter(address)?;
        contract.increment();
        self.store.save_counter(address, &contract)?;
        let round = contract.round();
        tracing::info!(%address, round, "counter incremented");
        self.emit(address, EventKind::Incremented { round });
        Ok(round)
    }

    /// The current round of a counter instance.
    pub fn round(&self, address: Bytes32) -> Result<u64> {
        Ok(self.store.load_counter(address)?.round())
    }

    /// The published ledger state of an instance, as JSON.
    pub fn published_state(&self, address: Bytes32) -> Result<serde_json::Value> {
        let (meta, ledger) = self.store.published_state(address)?;
        Ok(serde_json::json!({
            "address": address,
            "kind": meta.kind,
            "deployed_at": meta.deployed_at,
            "ledger": ledger,
        }))
    }
}
