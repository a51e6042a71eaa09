//! Stable hashing helpers for catalog fingerprints.

use blake3::Hasher;

use crate::schema::ColumnDescriptor;
use crate::table::TableDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        // blake3 hex(32b) is 64 hex chars
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental hasher with length-prefixed fields so that ("ab","c") and
/// ("a","bc") never collide.
#[derive(Default)]
pub struct Fingerprint {
    inner: Hasher,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn str(&mut self, s: &str) -> &mut Self {
        self.inner.update(&(s.len() as u64).to_le_bytes());
        self.inner.update(s.as_bytes());
        self
    }

    pub fn flag(&mut self, b: bool) -> &mut Self {
        self.inner.update(&[b as u8]);
        self
    }

    pub fn columns(&mut self, columns: &[ColumnDescriptor]) -> &mut Self {
        self.inner.update(&(columns.len() as u64).to_le_bytes());
        for c in columns {
            self.str(&c.name).str(c.column_type.name());
        }
        self
    }

    pub fn descriptor(&mut self, d: &TableDescriptor) -> &mut Self {
        self.str(&d.schema_name)
            .flag(d.matcher.is_pattern())
            .str(d.matcher.as_str())
            .str(&d.delimiter)
            .flag(d.has_header)
            .columns(&d.columns)
    }

    pub fn finish(&self) -> Hash256 {
        Hash256(self.inner.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_64_chars() {
        let h = Fingerprint::new().str("flatcat").finish();
        assert_eq!(h.to_hex().len(), 64);
        assert_eq!(h.to_string(), h.to_hex());
    }

    #[test]
    fn test_fingerprint_is_length_prefixed() {
        let a = Fingerprint::new().str("ab").str("c").finish();
        let b = Fingerprint::new().str("a").str("bc").finish();
        assert_ne!(a, b);
    }
}
