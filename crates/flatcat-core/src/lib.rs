#![forbid(unsafe_code)]
//! flatcat-core: shared data model for the flatcat connector.
//!
//! Holds the descriptor types (tables, columns, matchers), the single error
//! taxonomy used by every crate, connector configuration, and stable hashing.
//! No filesystem or network access lives here beyond reading config files.

pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod schema;
pub mod table;
