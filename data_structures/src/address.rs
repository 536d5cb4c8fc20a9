use std::{fmt, str::FromStr};

use thiserror::Error;

/// Length in bytes of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// Account address identifying a participant, written as `0x`-prefixed hex.
///
/// Ledger components are generic over the identity type; this is the
/// identity used by the command line interface and by persisted state.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address {
    pub(crate) bytes: [u8; ADDRESS_LENGTH],
}

/// Errors raised when parsing an `Address` from a string
#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    /// The string is not valid hexadecimal
    #[error("Invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The decoded bytes do not have the length of an address
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected number of bytes
        expected: usize,
        /// Number of bytes that were decoded
        actual: usize,
    },
}

impl Address {
    /// Build an address from raw bytes
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Raw bytes of this address
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let decoded = hex::decode(hex_str)?;
        if decoded.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: decoded.len(),
            });
        }

        let mut bytes = [0; ADDRESS_LENGTH];
        bytes.copy_from_slice(&decoded);

        Ok(Self { bytes })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parse_and_print() {
        let s = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
        let address = Address::from_str(s).unwrap();
        assert_eq!(address.to_string(), s);

        // Prefix is optional and hex is case-insensitive
        let upper = Address::from_str("70997970C51812DC3A010C7D01B50E0D17DC79C8").unwrap();
        assert_eq!(upper, address);
    }

    #[test]
    fn address_wrong_length() {
        let error = Address::from_str("0xdeadbeef").unwrap_err();
        assert_eq!(
            error,
            AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: 4
            }
        );
    }

    #[test]
    fn address_not_hex() {
        let error = Address::from_str("0xzz997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap_err();
        assert!(matches!(error, AddressError::InvalidHex(_)));
    }

    #[test]
    fn address_serde_json_is_hex_string() {
        let address = Address::from_bytes([0xab; ADDRESS_LENGTH]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
