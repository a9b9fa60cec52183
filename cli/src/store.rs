//! # Local Instance Store
//!
//! Deployed contract instances live in the data directory, one subdirectory
//! per 32-byte contract address. The two halves of an instance's state are
//! kept in separate files, the way the platform keeps them in separate
//! providers:
//!
//! ```text
//! <data-dir>/<address>/meta.json     — contract kind, deploy timestamp
//! <data-dir>/<address>/ledger.json   — published ledger state
//! <data-dir>/<address>/private.json  — private witness state (NFT only)
//! ```
//!
//! `show` and anything else that renders public state read `ledger.json`
//! only; `private.json` never leaves the instance directory.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use veil_contracts::counter::{CounterContract, CounterLedger};
use veil_contracts::nft_royalty::{
    NftLedger, NftPrivateState, NftRoyaltyContract, StandardWitnesses,
};
use veil_runtime::Bytes32;

const META_FILE: &str = "meta.json";
const LEDGER_FILE: &str = "ledger.json";
const PRIVATE_FILE: &str = "private.json";

/// The kinds of contract the harness can deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    /// The NFT royalty registry.
    Nft,
    /// The public counter.
    Counter,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Nft => write!(f, "nft"),
            ContractKind::Counter => write!(f, "counter"),
        }
    }
}

/// Instance metadata, written once at deploy time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceMeta {
    /// Which contract this instance runs.
    pub kind: ContractKind,
    /// When the instance was deployed.
    pub deployed_at: DateTime<Utc>,
}

/// File-backed store of deployed contract instances.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("failed to create data directory: {}", root.display()))?;
        Ok(Store {
            root: root.to_path_buf(),
        })
    }

    fn instance_dir(&self, address: Bytes32) -> PathBuf {
        self.root.join(address.to_hex())
    }

    /// Derives a fresh contract address from the kind tag and 32 bytes of
    /// entropy. Stands in for the platform's deploy-transaction hash.
    fn derive_address(kind: ContractKind) -> Bytes32 {
        let mut hasher = Sha256::new();
        hasher.update(kind.to_string().as_bytes());
        hasher.update(Bytes32::random().as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        Bytes32::new(digest)
    }

    /// Deploys a fresh instance of `kind` and returns its address.
    pub fn deploy(&self, kind: ContractKind) -> Result<Bytes32> {
        let address = Self::derive_address(kind);
        let dir = self.instance_dir(address);
        fs::create_dir(&dir)
            .with_context(|| format!("failed to create instance directory: {}", dir.display()))?;

        let meta = InstanceMeta {
            kind,
            deployed_at: Utc::now(),
        };
        write_json(&dir.join(META_FILE), &meta)?;

        match kind {
            ContractKind::Nft => {
                write_json(&dir.join(LEDGER_FILE), &NftLedger::default())?;
                write_json(&dir.join(PRIVATE_FILE), &NftPrivateState::default())?;
            }
            ContractKind::Counter => {
                write_json(&dir.join(LEDGER_FILE), &CounterLedger::default())?;
            }
        }

        Ok(address)
    }

    /// Reads an instance's metadata and checks it runs the expected kind.
    fn expect_kind(&self, address: Bytes32, expected: ContractKind) -> Result<InstanceMeta> {
        let meta = self.meta(address)?;
        if meta.kind != expected {
            bail!(
                "contract {} is a {} instance, not {}",
                address,
                meta.kind,
                expected
            );
        }
        Ok(meta)
    }

    /// Instance metadata for `address`.
    pub fn meta(&self, address: Bytes32) -> Result<InstanceMeta> {
        read_json(&self.instance_dir(address).join(META_FILE))
            .with_context(|| format!("no deployed contract at address {}", address))
    }

    /// Loads an NFT registry instance with the standard witness table.
    pub fn load_nft(&self, address: Bytes32) -> Result<NftRoyaltyContract> {
        self.expect_kind(address, ContractKind::Nft)?;
        let dir = self.instance_dir(address);
        let ledger: NftLedger = read_json(&dir.join(LEDGER_FILE))?;
        let private: NftPrivateState = read_json(&dir.join(PRIVATE_FILE))?;
        Ok(NftRoyaltyContract::resume(ledger, private, StandardWitnesses))
    }

    /// Persists both state halves of an NFT registry instance.
    pub fn save_nft(&self, address: Bytes32, contract: &NftRoyaltyContract) -> Result<()> {
        let dir = self.instance_dir(address);
        write_json(&dir.join(LEDGER_FILE), contract.ledger())?;
        write_json(&dir.join(PRIVATE_FILE), contract.private_state())?;
        Ok(())
    }

    /// Loads a counter instance.
    pub fn load_counter(&self, address: Bytes32) -> Result<CounterContract> {
        self.expect_kind(address, ContractKind::Counter)?;
        let ledger: CounterLedger = read_json(&self.instance_dir(address).join(LEDGER_FILE))?;
        Ok(CounterContract::resume(ledger))
    }

    /// Persists a counter instance's ledger.
    pub fn save_counter(&self, address: Bytes32, contract: &CounterContract) -> Result<()> {
        write_json(
            &self.instance_dir(address).join(LEDGER_FILE),
            contract.ledger(),
        )
    }

    /// The published ledger state of `address` as raw JSON, for display.
    /// Reads `ledger.json` only — private state is never included.
    pub fn published_state(&self, address: Bytes32) -> Result<(InstanceMeta, serde_json::Value)> {
        let meta = self.meta(address)?;
        let ledger = read_json(&self.instance_dir(address).join(LEDGER_FILE))?;
        Ok((meta, ledger))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> Bytes32 {
        Bytes32::from_u64(n)
    }

    #[test]
    fn deploy_and_reload_nft_instance() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let address = store.deploy(ContractKind::Nft).unwrap();
        let mut contract = store.load_nft(address).unwrap();
        contract.mint(id(1), id(0xAA), 10);
        store.save_nft(address, &contract).unwrap();

        let reloaded = store.load_nft(address).unwrap();
        assert_eq!(reloaded.get_owner(id(1)).unwrap(), id(0xAA));
        assert_eq!(reloaded.private_state().royalty_pct, 10);
    }

    #[test]
    fn deploy_and_reload_counter_instance() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let address = store.deploy(ContractKind::Counter).unwrap();
        let mut contract = store.load_counter(address).unwrap();
        contract.increment();
        store.save_counter(address, &contract).unwrap();

        assert_eq!(store.load_counter(address).unwrap().round(), 1);
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let address = store.deploy(ContractKind::Counter).unwrap();
        assert!(store.load_nft(address).is_err());
    }

    #[test]
    fn unknown_address_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.meta(id(1)).is_err());
    }

    #[test]
    fn published_state_excludes_private_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let address = store.deploy(ContractKind::Nft).unwrap();
        let mut contract = store.load_nft(address).unwrap();
        contract.mint(id(1), id(0xAA), 42);
        store.save_nft(address, &contract).unwrap();

        let (_, ledger) = store.published_state(address).unwrap();
        assert!(ledger.to_string().find("42").is_none());
        assert!(ledger.get("royalty_pct").is_none());
    }
}
