//! Convenient re-exports for downstream crates.

pub use crate::config::{ConnectorConfig, Protocol, ScanMode};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::schema::{ColumnDescriptor, ColumnType};
pub use crate::table::{ResolvedTable, SchemaTableName, TableDescriptor, TableMatcher};
