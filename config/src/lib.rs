//! Configuration of a PolyScale ledger
//!
//! Configuration sources (see [loaders](loaders)) produce a
//! [PartialConfig](partial::PartialConfig) where every param is optional. The
//! [Config](config::Config) used by the rest of the application is obtained by merging it
//! on top of the [defaults](defaults).

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

pub mod config;
pub mod defaults;
pub mod dirs;
pub mod loaders;
pub mod partial;

pub use crate::config::Config;
pub use crate::partial::PartialConfig;
