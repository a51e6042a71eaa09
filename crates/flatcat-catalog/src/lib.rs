#![forbid(unsafe_code)]
//! flatcat-catalog: from table descriptions to a browsable catalog.
//!
//! - `store`: loads JSON table descriptions from a directory.
//! - `resolve`: expands descriptors against a transport listing into
//!   `(schema, file)` entries, including header inference.
//! - `discover`: builds suffix-based descriptors when no descriptions exist.
//! - `catalog`: the immutable snapshot handed to hosts.

pub mod catalog;
pub mod discover;
pub mod resolve;
pub mod store;

pub use catalog::Catalog;
pub use discover::discover;
pub use resolve::{resolve, ResolveOptions};
pub use store::{load_all, parse_descriptor};
