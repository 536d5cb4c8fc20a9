use std::str::FromStr;

use polyscale_data_structures::{Address, ModelEntry, Tokens};

#[test]
fn address_is_raw_bytes_in_binary_encodings() {
    let address = Address::from_str("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap();
    let bytes = bincode::serialize(&address).unwrap();

    // Fixed-size array, no length prefix
    assert_eq!(bytes, address.as_bytes().to_vec());
    assert_eq!(bincode::deserialize::<Address>(&bytes).unwrap(), address);
}

#[test]
fn model_entry_json_uses_hex_submitter() {
    let submitter = Address::from_str("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap();
    let entry = ModelEntry {
        id: 7,
        round: 3,
        content_id: "QmTestCID123".to_string(),
        metadata: String::new(),
        submitter,
        timestamp: 1_700_000_000,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        json["submitter"],
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
    );
    assert_eq!(json["content_id"], "QmTestCID123");

    let stored = bincode::serialize(&entry).unwrap();
    let restored: ModelEntry<Address> = bincode::deserialize(&stored).unwrap();
    assert_eq!(restored, entry);
}

#[test]
fn tokens_are_plain_integers_in_json() {
    assert_eq!(serde_json::to_string(&Tokens::from(500)).unwrap(), "500");
}
