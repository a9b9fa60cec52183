//! Integration tests for the NFT royalty registry.
//!
//! These exercise the contract the way the CLI harness drives it: sequences
//! of mints, transfers, and lookups against one instance, asserting both
//! the happy paths and the characterization behaviors (counter decoupling,
//! silent re-mint overwrite) that the deployed contract exhibits.

use veil_contracts::nft_royalty::{NftError, NftRoyaltyContract};
use veil_runtime::Bytes32;

fn id(n: u64) -> Bytes32 {
    Bytes32::from_u64(n)
}

// ---------------------------------------------------------------------------
// Mint & Lookup
// ---------------------------------------------------------------------------

#[test]
fn distinct_mints_are_independent_of_order() {
    let (t1, c1) = (id(1), id(0xA1));
    let (t2, c2) = (id(2), id(0xB2));

    let mut forward = NftRoyaltyContract::new();
    forward.mint(t1, c1, 5);
    forward.mint(t2, c2, 5);

    let mut reverse = NftRoyaltyContract::new();
    reverse.mint(t2, c2, 5);
    reverse.mint(t1, c1, 5);

    for contract in [&forward, &reverse] {
        assert_eq!(contract.get_owner(t1).unwrap(), c1);
        assert_eq!(contract.get_creator(t1).unwrap(), c1);
        assert_eq!(contract.get_owner(t2).unwrap(), c2);
        assert_eq!(contract.get_creator(t2).unwrap(), c2);
    }
}

#[test]
fn reminting_same_id_overwrites_silently() {
    // Characterization: the contract does not reject duplicate token ids.
    // The second mint wins, owner and creator both.
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);
    contract.mint(id(1), id(0xBB), 20);

    assert_eq!(contract.get_owner(id(1)).unwrap(), id(0xBB));
    assert_eq!(contract.get_creator(id(1)).unwrap(), id(0xBB));
    assert_eq!(contract.ledger().nft_owner.size(), 1);
}

#[test]
fn counter_counts_mints_not_unique_tokens() {
    // Characterization: next_token_id is bumped per mint call, colliding
    // ids included, and is never consulted to name tokens.
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 0);
    contract.mint(id(1), id(0xBB), 0);
    contract.mint(id(2), id(0xCC), 0);

    assert_eq!(contract.ledger().next_token_id.value(), 3);
    assert_eq!(contract.ledger().nft_owner.size(), 2);
}

#[test]
fn lookup_of_unminted_id_fails() {
    let contract = NftRoyaltyContract::new();
    assert_eq!(
        contract.get_owner(id(42)).unwrap_err(),
        NftError::NotFound { token_id: id(42) }
    );
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[test]
fn owner_can_transfer() {
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);

    contract.transfer(id(1), id(0xAA), id(0xBB)).unwrap();
    assert_eq!(contract.get_owner(id(1)).unwrap(), id(0xBB));
}

#[test]
fn non_owner_transfer_rejected_without_mutation() {
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);
    let ledger_before = contract.ledger().clone();

    let err = contract.transfer(id(1), id(0xCC), id(0xBB)).unwrap_err();
    assert!(matches!(err, NftError::OwnershipViolation { .. }));

    // Atomicity: the failed transfer left the ledger byte-identical.
    assert_eq!(contract.ledger(), &ledger_before);
    assert_eq!(contract.get_owner(id(1)).unwrap(), id(0xAA));
}

#[test]
fn previous_owner_loses_transfer_rights() {
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);
    contract.transfer(id(1), id(0xAA), id(0xBB)).unwrap();

    let err = contract.transfer(id(1), id(0xAA), id(0xCC)).unwrap_err();
    assert!(matches!(err, NftError::OwnershipViolation { .. }));
    assert_eq!(contract.get_owner(id(1)).unwrap(), id(0xBB));
}

#[test]
fn creator_survives_any_transfer_chain() {
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);

    let chain = [id(0xAA), id(0xBB), id(0xCC), id(0xDD)];
    for pair in chain.windows(2) {
        contract.transfer(id(1), pair[0], pair[1]).unwrap();
    }

    assert_eq!(contract.get_owner(id(1)).unwrap(), id(0xDD));
    assert_eq!(contract.get_creator(id(1)).unwrap(), id(0xAA));
}

// ---------------------------------------------------------------------------
// Private state
// ---------------------------------------------------------------------------

#[test]
fn royalty_slot_holds_most_recent_mint() {
    // Characterization: one global slot, not per-token.
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);
    assert_eq!(contract.private_state().royalty_pct, 10);

    contract.mint(id(2), id(0xBB), 25);
    assert_eq!(contract.private_state().royalty_pct, 25);
}

#[test]
fn transfer_leaves_private_state_alone() {
    let mut contract = NftRoyaltyContract::new();
    contract.mint(id(1), id(0xAA), 10);
    contract.transfer(id(1), id(0xAA), id(0xBB)).unwrap();
    assert_eq!(contract.private_state().royalty_pct, 10);
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn demo_scenario() {
    // The scripted sequence the demo harness runs: two mints, a transfer,
    // then lookups.
    let mut contract = NftRoyaltyContract::new();

    contract.mint(id(0x01), id(0xAA), 10);
    contract.mint(id(0x02), id(0xBB), 25);
    contract.transfer(id(0x01), id(0xAA), id(0xCC)).unwrap();

    assert_eq!(contract.get_owner(id(0x01)).unwrap(), id(0xCC));
    assert_eq!(contract.get_creator(id(0x01)).unwrap(), id(0xAA));
    assert_eq!(contract.get_owner(id(0x02)).unwrap(), id(0xBB));
    assert_eq!(contract.ledger().next_token_id.value(), 2);
    assert_eq!(contract.private_state().royalty_pct, 25);
}
