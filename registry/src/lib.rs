//! Append-only registry of submitted model artifacts

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

pub mod registry;
pub use registry::ModelRegistry;
