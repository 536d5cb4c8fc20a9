//! PolyScale ledger: the model registry, the reward token and the reputation ledger of a
//! federated-learning deployment, kept together in a single store.

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

pub mod ledger;

pub use ledger::{Ledger, Store};
