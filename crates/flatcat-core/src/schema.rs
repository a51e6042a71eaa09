//! Column-level schema types. Pure data; no parsing of row content here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four column types a table description can declare.
///
/// Anything that is not recognised falls back to `Varchar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Boolean,
    BigInt,
    Double,
    Varchar,
}

impl ColumnType {
    /// Map a declared type name (case-insensitive) to a column type.
    /// Absent, empty, or unknown names become `Varchar`.
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("BOOLEAN") => ColumnType::Boolean,
            Some("BIGINT") => ColumnType::BigInt,
            Some("DOUBLE") => ColumnType::Double,
            _ => ColumnType::Varchar,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Varchar => "VARCHAR",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Varchar
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column of a table. Its ordinal is its index in the owning column list
/// and always equals the field offset in each data row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn varchar(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Varchar)
    }
}

/// Position of a column by name within an ordered column list.
pub fn index_of(columns: &[ColumnDescriptor], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_mapping_is_case_insensitive() {
        assert_eq!(ColumnType::from_declared(Some("bigint")), ColumnType::BigInt);
        assert_eq!(ColumnType::from_declared(Some("Double")), ColumnType::Double);
        assert_eq!(ColumnType::from_declared(Some("BOOLEAN")), ColumnType::Boolean);
        assert_eq!(ColumnType::from_declared(Some("varchar")), ColumnType::Varchar);
    }

    #[test]
    fn test_unknown_or_missing_type_falls_back_to_varchar() {
        assert_eq!(ColumnType::from_declared(None), ColumnType::Varchar);
        assert_eq!(ColumnType::from_declared(Some("")), ColumnType::Varchar);
        assert_eq!(ColumnType::from_declared(Some("DECIMAL(10,2)")), ColumnType::Varchar);
    }

    #[test]
    fn test_index_of() {
        let cols = vec![
            ColumnDescriptor::new("id", ColumnType::BigInt),
            ColumnDescriptor::varchar("name"),
        ];
        assert_eq!(index_of(&cols, "name"), Some(1));
        assert_eq!(index_of(&cols, "missing"), None);
    }

    #[test]
    fn test_column_serializes_with_type_key() {
        let col = ColumnDescriptor::new("amount", ColumnType::Double);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json, serde_json::json!({"name": "amount", "type": "DOUBLE"}));
        let back: ColumnDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, col);
    }
}
