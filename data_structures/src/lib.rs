//! Value types shared by the PolyScale ledger components.

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

/// Module containing the account address used as participant identity
pub mod address;

/// Module containing the explicit caller permission checks
pub mod access;

/// Module containing error definitions
pub mod error;

/// Module containing the model registry entry type
pub mod model;

/// Module containing the token amount type
pub mod tokens;

/// Serialization boilerplate to allow serializing some data structures as
/// strings or bytes depending on the serializer.
mod serialization_helpers;

pub use access::{AccessPolicy, Operation};
pub use address::Address;
pub use error::{InvalidInput, LedgerError, LedgerResult};
pub use model::{ModelEntry, ModelId, Round};
pub use tokens::Tokens;
