//! sqldeck core - shared abstractions for the query dispatch layer
//!
//! This crate provides the types and traits that the connector, preset,
//! and dispatch crates depend on. It defines:
//!
//! - `Connector` - Trait for database engine entry points
//! - `Connection` - Trait for live connection handles
//! - `Preset` - A named connection profile
//! - Common types like `Value`, `Row`, `ColumnMeta`, `QueryResult`

mod connector;
mod error;
mod preset;
mod types;

pub use connector::*;
pub use error::*;
pub use preset::*;
pub use types::*;
