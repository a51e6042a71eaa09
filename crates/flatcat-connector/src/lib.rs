#![forbid(unsafe_code)]
//! flatcat-connector: the surface a query engine host talks to.
//!
//! A `Connector` turns a `ConnectorConfig` into catalog answers and row
//! cursors. Every catalog pass and every cursor runs on its own transport
//! session, so calls can be made from any number of host threads.

pub mod connector;

pub use connector::{Connector, DescriptorSource};

pub use flatcat_catalog::Catalog;
pub use flatcat_core::prelude::*;
pub use flatcat_scan::{FieldKind, RowCursor, ScanOptions};
