//! Table descriptors: which files under a schema directory form a table, and
//! how their lines are laid out.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::ColumnDescriptor;

pub const DEFAULT_DELIMITER: &str = ",";

/// Fully qualified (schema, physical table) name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaTableName {
    pub schema: String,
    pub table: String,
}

impl SchemaTableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Selects the physical files that belong to a descriptor.
#[derive(Debug, Clone)]
pub enum TableMatcher {
    /// Exact file-name equality.
    Literal(String),
    /// Unanchored regex search over the file name.
    Pattern { source: String, regex: Regex },
}

impl TableMatcher {
    pub fn literal(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Config("table matcher must not be empty".into()));
        }
        Ok(TableMatcher::Literal(name))
    }

    pub fn pattern(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if source.is_empty() {
            return Err(Error::Config("table matcher must not be empty".into()));
        }
        let regex = Regex::new(&source)
            .map_err(|e| Error::Config(format!("invalid table pattern '{source}': {e}")))?;
        Ok(TableMatcher::Pattern { source, regex })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            TableMatcher::Literal(name) => name == file_name,
            TableMatcher::Pattern { regex, .. } => regex.is_match(file_name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TableMatcher::Literal(name) => name,
            TableMatcher::Pattern { source, .. } => source,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, TableMatcher::Pattern { .. })
    }

    /// Order two matchers by how specifically they name a file.
    ///
    /// `Greater` means `self` wins a collision over `other`. Literals beat
    /// patterns; longer patterns beat shorter ones; equal-length patterns are
    /// ordered so the lexicographically smaller text wins.
    pub fn specificity_cmp(&self, other: &TableMatcher) -> Ordering {
        match (self, other) {
            (TableMatcher::Literal(_), TableMatcher::Pattern { .. }) => Ordering::Greater,
            (TableMatcher::Pattern { .. }, TableMatcher::Literal(_)) => Ordering::Less,
            (TableMatcher::Literal(_), TableMatcher::Literal(_)) => Ordering::Equal,
            (TableMatcher::Pattern { source: a, .. }, TableMatcher::Pattern { source: b, .. }) => {
                a.len().cmp(&b.len()).then_with(|| b.cmp(a))
            }
        }
    }
}

impl PartialEq for TableMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for TableMatcher {}

impl fmt::Display for TableMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableMatcher::Literal(name) => write!(f, "{name}"),
            TableMatcher::Pattern { source, .. } => write!(f, "/{source}/"),
        }
    }
}

/// Immutable description of one logical table (or a family of files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub schema_name: String,
    pub matcher: TableMatcher,
    pub delimiter: String,
    pub has_header: bool,
    /// Empty means the columns are inferred from the header line.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(schema_name: impl Into<String>, matcher: TableMatcher) -> Self {
        Self {
            schema_name: schema_name.into(),
            matcher,
            delimiter: DEFAULT_DELIMITER.to_string(),
            has_header: false,
            columns: Vec::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        self.delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER.to_string()
        } else {
            delimiter
        };
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    /// True when no columns were declared and they must come from the header.
    pub fn infers_columns(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A physical file bound to the descriptor that claims it.
///
/// Built fresh on every catalog pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    pub schema_name: String,
    pub table_name: String,
    pub descriptor: Arc<TableDescriptor>,
    pub columns: Vec<ColumnDescriptor>,
    /// Columns came from the file's header line, not from the descriptor.
    pub columns_inferred: bool,
}

impl ResolvedTable {
    /// Bind a file to a descriptor that declares its columns.
    pub fn declared(table_name: impl Into<String>, descriptor: Arc<TableDescriptor>) -> Self {
        Self {
            schema_name: descriptor.schema_name.clone(),
            table_name: table_name.into(),
            columns: descriptor.columns.clone(),
            descriptor,
            columns_inferred: false,
        }
    }

    /// Bind a file to a descriptor with columns taken from the header line.
    pub fn inferred(
        table_name: impl Into<String>,
        descriptor: Arc<TableDescriptor>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        Self {
            schema_name: descriptor.schema_name.clone(),
            table_name: table_name.into(),
            descriptor,
            columns,
            columns_inferred: true,
        }
    }

    pub fn name(&self) -> SchemaTableName {
        SchemaTableName::new(&self.schema_name, &self.table_name)
    }

    pub fn delimiter(&self) -> &str {
        &self.descriptor.delimiter
    }

    pub fn has_header(&self) -> bool {
        self.descriptor.has_header
    }
}
