//! Per-field value classification used by inferred scans.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("valid regex"));
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.\d*|\.\d+)$").expect("valid regex"));
static EXPONENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)[eE][+-]?\d+$").expect("valid regex"));
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}(\.\d{1,9})?$").expect("valid regex")
});
static BOOLEAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:true|false)$").expect("valid regex"));

/// Shape of a single non-null field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Decimal,
    Exponential,
    Date,
    Timestamp,
    Boolean,
    Text,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "INTEGER",
            FieldKind::Decimal => "DECIMAL",
            FieldKind::Exponential => "EXPONENTIAL",
            FieldKind::Date => "DATE",
            FieldKind::Timestamp => "TIMESTAMP",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Text => "TEXT",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Integer | FieldKind::Decimal | FieldKind::Exponential
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a field's text. First matching shape wins; anything else is text.
pub fn classify(value: &str) -> FieldKind {
    let v = value.trim();
    if INTEGER.is_match(v) {
        FieldKind::Integer
    } else if DECIMAL.is_match(v) {
        FieldKind::Decimal
    } else if EXPONENTIAL.is_match(v) {
        FieldKind::Exponential
    } else if TIMESTAMP.is_match(v) {
        FieldKind::Timestamp
    } else if DATE.is_match(v) {
        FieldKind::Date
    } else if BOOLEAN.is_match(v) {
        FieldKind::Boolean
    } else {
        FieldKind::Text
    }
}

pub(crate) fn parse_boolean(value: &str) -> Option<bool> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| e.to_string())
}

pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let v = value.trim().replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&v, "%Y-%m-%d %H:%M:%S%.f").map_err(|e| e.to_string())
}
