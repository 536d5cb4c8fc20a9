use std::str::FromStr;

use polyscale::Ledger;
use polyscale_config::Config;
use polyscale_data_structures::{Address, LedgerError, Tokens};
use polyscale_storage::backends::btreemap::Backend;

fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

const OWNER: &str = "0x1111111111111111111111111111111111111111";
const CLIENT_0: &str = "0x2222222222222222222222222222222222222222";
const ADDR1: &str = "0x3333333333333333333333333333333333333333";

#[test]
fn federated_round() {
    let ledger = Ledger::new(&Config::default());
    let owner = addr(OWNER);
    let client = addr(CLIENT_0);

    let entry = ledger
        .registry
        .register_model(&client, 1, "cid123", "{\"acc\":0.90}")
        .unwrap();
    assert_eq!(entry.submitter, client);
    assert_eq!(ledger.registry.total_models(), 1);

    ledger.token.mint(&owner, &owner, Tokens::from(1000)).unwrap();
    ledger.token.reward(&owner, &client, Tokens::from(50)).unwrap();
    ledger
        .reputation
        .add_reputation(&owner, &client, 20)
        .unwrap();
    ledger
        .reputation
        .reduce_reputation(&owner, &client, 5)
        .unwrap();

    assert_eq!(ledger.token.balance_of(&client), Tokens::from(50));
    assert_eq!(ledger.token.total_supply(), Tokens::from(1050));
    assert_eq!(ledger.reputation.get_reputation(&client), 15);
}

#[test]
fn failed_burn_leaves_other_components_alone() {
    let ledger = Ledger::new(&Config::default());
    let owner = addr(OWNER);
    let addr1 = addr(ADDR1);

    ledger.token.mint(&owner, &addr1, Tokens::from(500)).unwrap();
    ledger.reputation.add_reputation(&owner, &addr1, 3).unwrap();

    assert_eq!(
        ledger.token.burn(&owner, &addr1, Tokens::from(600)),
        Err(LedgerError::InsufficientBalance {
            requested: Tokens::from(600),
            available: Tokens::from(500),
        })
    );
    assert_eq!(ledger.token.balance_of(&addr1), Tokens::from(500));
    assert_eq!(ledger.reputation.get_reputation(&addr1), 3);
}

#[test]
fn ledger_survives_persist_and_restore() {
    let config = Config::default();
    let storage = Backend::default();
    let owner = addr(OWNER);
    let client = addr(CLIENT_0);

    let ledger = Ledger::new(&config);
    for round in 1..=3 {
        ledger
            .registry
            .register_model(&client, round, &format!("cid-{}", round), "")
            .unwrap();
        ledger.token.reward(&owner, &client, Tokens::from(10)).unwrap();
        ledger
            .reputation
            .add_reputation(&owner, &client, round)
            .unwrap();
    }
    ledger.persist(&storage).unwrap();

    let restored = Ledger::restore(&storage, &config).unwrap();
    assert_eq!(restored.registry.get_models(), ledger.registry.get_models());
    assert_eq!(restored.token.balances(), ledger.token.balances());
    assert_eq!(restored.token.total_supply(), Tokens::from(30));
    assert_eq!(restored.reputation.get_reputation(&client), 6);
}
