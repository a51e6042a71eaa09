//! Expanding descriptors into concrete `(schema, file)` catalog entries.
//!
//! Every call lists the backend again; nothing is cached between calls.

use std::cmp::Ordering;
use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::HashSet;
use std::sync::Arc;

use flatcat_core::config::ConnectorConfig;
use flatcat_core::error::{Error, Result};
use flatcat_core::schema::ColumnDescriptor;
use flatcat_core::table::{ResolvedTable, SchemaTableName, TableDescriptor};
use flatcat_io::buf::BoundedLineReader;
use flatcat_io::transport::Transport;
use flatcat_scan::split::{unquote, LineSplitter};

use crate::catalog::Catalog;

const HEADER_BUFFER_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// A schema directory that does not exist contributes no tables instead
    /// of failing the whole resolution.
    pub skip_missing_schemas: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            skip_missing_schemas: true,
        }
    }
}

impl ResolveOptions {
    pub fn from_config(cfg: &ConnectorConfig) -> Self {
        Self {
            skip_missing_schemas: cfg.skip_missing_schemas,
        }
    }
}

/// Which descriptor currently owns a physical file.
struct Claim {
    order: usize,
    descriptor: Arc<TableDescriptor>,
}

/// Resolve `descriptors` against the files visible through `transport`.
///
/// When several descriptors match the same file the most specific one wins:
/// a literal beats any pattern, a longer pattern beats a shorter one, and
/// equal-length patterns fall to the lexicographically smaller text. Two
/// literals naming the same file are a configuration error.
pub fn resolve(
    descriptors: &[TableDescriptor],
    transport: &mut dyn Transport,
    opts: &ResolveOptions,
) -> Result<Catalog> {
    let mut claims: BTreeMap<SchemaTableName, Claim> = BTreeMap::new();

    for (order, desc) in descriptors.iter().enumerate() {
        let names = match transport.list_tables(&desc.schema_name, &desc.matcher) {
            Ok(names) => names,
            Err(e) if e.is_not_found() && opts.skip_missing_schemas => {
                tracing::warn!(
                    schema = %desc.schema_name,
                    matcher = %desc.matcher,
                    error = %e,
                    "schema directory missing; descriptor yields no tables"
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        let descriptor = Arc::new(desc.clone());
        for name in names {
            let key = SchemaTableName::new(&desc.schema_name, name);
            match claims.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(Claim {
                        order,
                        descriptor: Arc::clone(&descriptor),
                    });
                }
                Entry::Occupied(mut slot) => {
                    let current = slot.get();
                    if !current.descriptor.matcher.is_pattern() && !desc.matcher.is_pattern() {
                        return Err(Error::Config(format!(
                            "ambiguous descriptors: {} is claimed by two literal table names",
                            slot.key()
                        )));
                    }
                    let challenger = desc.matcher.specificity_cmp(&current.descriptor.matcher);
                    if challenger == Ordering::Greater {
                        tracing::debug!(
                            table = %slot.key(),
                            winner = %desc.matcher,
                            loser = %current.descriptor.matcher,
                            "descriptor override"
                        );
                        slot.insert(Claim {
                            order,
                            descriptor: Arc::clone(&descriptor),
                        });
                    } else {
                        tracing::debug!(
                            table = %slot.key(),
                            winner = %current.descriptor.matcher,
                            winner_order = current.order,
                            loser = %desc.matcher,
                            "descriptor override"
                        );
                    }
                }
            }
        }
    }

    let mut tables = Vec::with_capacity(claims.len());
    for (key, claim) in claims {
        let desc = claim.descriptor;
        if desc.infers_columns() && desc.has_header {
            let columns = match read_header(transport, &key, &desc.delimiter)? {
                Some(columns) => columns,
                None => {
                    tracing::warn!(table = %key, "empty file has no header line; no columns");
                    Vec::new()
                }
            };
            tables.push(ResolvedTable::inferred(key.table, desc, columns));
        } else {
            tables.push(ResolvedTable::declared(key.table, desc));
        }
    }
    Ok(Catalog::from_tables(tables))
}

/// Read the first line of a file and derive VARCHAR columns from it.
/// `None` when the file is empty.
fn read_header(
    transport: &mut dyn Transport,
    key: &SchemaTableName,
    delimiter: &str,
) -> Result<Option<Vec<ColumnDescriptor>>> {
    let stream = transport.open_stream(&key.schema, &key.table)?;
    let mut reader = BoundedLineReader::with_capacity(HEADER_BUFFER_BYTES, stream);
    let mut line = String::new();
    let read = reader
        .next_line(&mut line)
        .map_err(|e| Error::transport("read", key.to_string(), e))?;
    if read.is_none() {
        return Ok(None);
    }
    Ok(Some(header_columns(&LineSplitter::new(delimiter), &line)))
}

/// Column names from a header line: trimmed and unquoted, with empty or
/// repeated names replaced by `column_<i>`. A placeholder that is itself
/// taken gets a `_<n>` suffix, so every name is unique.
pub fn header_columns(splitter: &LineSplitter, line: &str) -> Vec<ColumnDescriptor> {
    let mut seen = HashSet::new();
    splitter
        .split_raw(line)
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let mut name = unquote(raw.trim()).trim().to_string();
            if name.is_empty() || seen.contains(&name) {
                name = format!("column_{i}");
                let mut n = 1;
                while seen.contains(&name) {
                    name = format!("column_{i}_{n}");
                    n += 1;
                }
            }
            seen.insert(name.clone());
            ColumnDescriptor::varchar(name)
        })
        .collect()
}
