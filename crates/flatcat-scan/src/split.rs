//! Quote-aware line splitting.
//!
//! A delimiter occurrence splits the line only when an even number of `"`
//! characters follows it, i.e. it does not sit inside a quoted field. Splitting
//! never fails: an unbalanced quote just keeps the rest of the line together.

use flatcat_core::table::DEFAULT_DELIMITER;

/// Splits raw lines with a fixed delimiter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSplitter {
    delimiter: String,
    delimiter_quotes: usize,
}

impl LineSplitter {
    pub fn new(delimiter: &str) -> Self {
        let delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            delimiter
        };
        Self {
            delimiter: delimiter.to_string(),
            delimiter_quotes: count_quotes(delimiter.as_bytes()),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split `line` into raw field text, quotes untouched.
    pub fn split_raw<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let bytes = line.as_bytes();
        let delim = self.delimiter.as_bytes();
        let total_quotes = count_quotes(bytes);

        let mut fields = Vec::new();
        let mut start = 0;
        let mut quotes_before = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i..].starts_with(delim) {
                let quotes_after = total_quotes - quotes_before - self.delimiter_quotes;
                if quotes_after % 2 == 0 {
                    // A delimiter starts on a char boundary, so the slice is valid.
                    fields.push(&line[start..i]);
                    quotes_before += self.delimiter_quotes;
                    i += delim.len();
                    start = i;
                    continue;
                }
            }
            if bytes[i] == b'"' {
                quotes_before += 1;
            }
            i += 1;
        }
        fields.push(&line[start..]);
        fields
    }

    /// Split, unquote and null-normalize every field of `line`.
    pub fn split(&self, line: &str) -> Vec<Option<String>> {
        self.split_raw(line)
            .into_iter()
            .map(|f| normalize_null(unquote(f)))
            .collect()
    }
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

fn count_quotes(bytes: &[u8]) -> usize {
    bytes.iter().filter(|b| **b == b'"').count()
}

/// Strip one pair of surrounding quotes and collapse doubled quotes inside.
pub fn unquote(field: &str) -> String {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].replace("\"\"", "\"")
    } else {
        field.to_string()
    }
}

/// Empty text and the literals `null` / `NULL` read as SQL NULL.
pub fn normalize_null(field: String) -> Option<String> {
    match field.as_str() {
        "" | "null" | "NULL" => None,
        _ => Some(field),
    }
}
