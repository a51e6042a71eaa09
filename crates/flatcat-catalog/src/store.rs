//! Loading table descriptions from a directory of JSON documents.
//!
//! One document per `*.json` file:
//!
//! ```json
//! {
//!   "schemaName": "sales",
//!   "tableName": "orders.csv",
//!   "wildcard": false,
//!   "delimiter": ",",
//!   "hasHeader": true,
//!   "columns": [{ "name": "id", "type": "BIGINT" }]
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use flatcat_core::error::{Error, Result};
use flatcat_core::schema::{ColumnDescriptor, ColumnType};
use flatcat_core::table::{TableDescriptor, TableMatcher};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    schema_name: Option<String>,
    table_name: Option<String>,
    #[serde(default)]
    wildcard: bool,
    #[serde(default)]
    delimiter: Option<String>,
    #[serde(default)]
    has_header: bool,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    name: Option<String>,
    #[serde(rename = "type", default)]
    column_type: Option<String>,
}

/// Parse one document. `origin` names the source in error messages.
pub fn parse_descriptor(origin: &str, text: &str) -> Result<TableDescriptor> {
    let malformed = |message: String| Error::Descriptor {
        path: origin.to_string(),
        message,
    };

    let raw: RawDescriptor = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;

    let schema_name = raw
        .schema_name
        .ok_or_else(|| malformed("missing schemaName".into()))?;
    let table_name = raw
        .table_name
        .ok_or_else(|| malformed("missing tableName".into()))?;
    if table_name.is_empty() {
        return Err(malformed("tableName must not be empty".into()));
    }

    let matcher = if raw.wildcard {
        TableMatcher::pattern(table_name)
    } else {
        TableMatcher::literal(table_name)
    }
    .map_err(|e| malformed(e.to_string()))?;

    let mut columns = Vec::with_capacity(raw.columns.len());
    for (i, c) in raw.columns.into_iter().enumerate() {
        let name = c.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(malformed(format!("column {i} has an empty name")));
        }
        columns.push(ColumnDescriptor::new(
            name,
            ColumnType::from_declared(c.column_type.as_deref()),
        ));
    }

    Ok(TableDescriptor::new(schema_name, matcher)
        .with_delimiter(raw.delimiter.unwrap_or_default())
        .with_header(raw.has_header)
        .with_columns(columns))
}

/// Load every `*.json` description in `dir`, in file-name order.
///
/// A missing directory holds no descriptions. The first malformed document
/// aborts the load.
pub fn load_all(dir: impl AsRef<Path>) -> Result<Vec<TableDescriptor>> {
    let dir = dir.as_ref();
    let label = dir.display().to_string();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %label, "table description directory not found");
            return Ok(Vec::new());
        }
        Err(e) => {
            if dir.exists() && !dir.is_dir() {
                return Err(Error::Config(format!(
                    "table description path '{label}' is not a directory"
                )));
            }
            return Err(Error::transport("list", label, e));
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::transport("list", label.clone(), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let origin = path.display().to_string();
        tracing::debug!(path = %origin, "loading table description");
        let text =
            fs::read_to_string(&path).map_err(|e| Error::transport("read", origin.clone(), e))?;
        out.push(parse_descriptor(&origin, &text)?);
    }
    Ok(out)
}
