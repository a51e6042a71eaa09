//! Suffix-based table discovery for deployments without table descriptions.

use flatcat_core::error::Result;
use flatcat_core::table::{TableDescriptor, TableMatcher};
use flatcat_io::transport::Transport;

/// One header-inferring descriptor per schema directory, claiming every file
/// whose name ends in `.<suffix>`.
pub fn discover(
    transport: &mut dyn Transport,
    suffix: &str,
    delimiter: &str,
) -> Result<Vec<TableDescriptor>> {
    let suffix = suffix.trim_start_matches('.');
    let pattern = format!(r"\.{}$", regex::escape(suffix));

    let schemas = transport.list_schemas()?;
    tracing::debug!(
        backend = %transport.describe(),
        schemas = schemas.len(),
        suffix = %suffix,
        "discovering tables by suffix"
    );

    schemas
        .into_iter()
        .map(|schema| -> Result<TableDescriptor> {
            Ok(TableDescriptor::new(schema, TableMatcher::pattern(pattern.clone())?)
                .with_delimiter(delimiter)
                .with_header(true))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use flatcat_io::memory::MemoryTransport;

    use super::*;
    use crate::resolve::{resolve, ResolveOptions};

    #[test]
    fn test_discover_builds_one_descriptor_per_schema() {
        let mut t = MemoryTransport::new();
        t.insert("sales", "orders.csv", "id,amount\n1,2\n");
        t.insert("sales", "orders.csv.bak", "id\n");
        t.insert("sales", "readme.txt", "x\n");
        t.insert("hr", "staff.csv", "name\nann\n");
        t.add_schema("empty");

        let descs = discover(&mut t, "csv", ",").unwrap();
        assert_eq!(descs.len(), 3);
        assert!(descs.iter().all(|d| d.has_header && d.infers_columns()));

        let c = resolve(&descs, &mut t, &ResolveOptions::default()).unwrap();
        assert_eq!(c.list_schemas(), vec!["hr", "sales"]);
        assert_eq!(c.list_tables("sales"), vec!["orders.csv"]);
        let orders = c.get_table("sales", "orders.csv").unwrap();
        assert_eq!(orders.columns.len(), 2);
        assert_eq!(orders.columns[1].name, "amount");
    }

    #[test]
    fn test_suffix_is_literal() {
        let mut t = MemoryTransport::new();
        t.insert("s", "a.tsv", "h\n");
        t.insert("s", "a.t.v", "h\n");
        let descs = discover(&mut t, ".t.v", "\t").unwrap();
        assert!(descs[0].matcher.matches("a.t.v"));
        assert!(!descs[0].matcher.matches("a.tsv"));
        assert_eq!(descs[0].delimiter, "\t");
    }
}
