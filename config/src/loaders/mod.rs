//! Configuration sources. Every loader returns a [PartialConfig](crate::PartialConfig).
pub mod toml;
