use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use flatcat_core::config::normalize_base;
use flatcat_core::error::{Error, Result};
use flatcat_core::table::TableMatcher;

use super::{join_path, TableStream, Transport};

/// Local filesystem transport rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    base: String,
    closed: bool,
}

impl LocalTransport {
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            closed: false,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn ensure_open(&self, op: &'static str, target: &str) -> Result<()> {
        if self.closed {
            return Err(Error::transport(
                op,
                target,
                io::Error::new(io::ErrorKind::NotConnected, "session closed"),
            ));
        }
        Ok(())
    }
}

/// Read a directory, keeping UTF-8 entry names for which `keep(path)` holds.
fn list_dir(dir: &str, keep: impl Fn(&Path) -> bool) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !keep(&path) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            out.push(name.to_string());
        }
    }
    Ok(out)
}

impl Transport for LocalTransport {
    fn open_stream(&mut self, schema: &str, table: &str) -> Result<TableStream> {
        let path = join_path(&self.base, &[schema, table]);
        self.ensure_open("open", &path)?;
        let f = File::open(Path::new(&path)).map_err(|e| Error::transport("open", &path, e))?;
        Ok(Box::new(f))
    }

    fn list_schemas(&mut self) -> Result<BTreeSet<String>> {
        self.ensure_open("list", &self.base)?;
        let names = list_dir(&self.base, |p| p.is_dir())
            .map_err(|e| Error::transport("list", &self.base, e))?;
        Ok(names.into_iter().collect())
    }

    fn list_tables(&mut self, schema: &str, matcher: &TableMatcher) -> Result<BTreeSet<String>> {
        let dir = join_path(&self.base, &[schema]);
        self.ensure_open("list", &dir)?;
        let names =
            list_dir(&dir, |p| !p.is_dir()).map_err(|e| Error::transport("list", &dir, e))?;
        Ok(names.into_iter().filter(|n| matcher.matches(n)).collect())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file://{}", self.base)
    }
}
