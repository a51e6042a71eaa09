//! In-memory transport for tests and embedding.
//!
//! Holds a `schema -> file -> bytes` tree shared between handles. Every handle
//! is its own session; session open/close counts are shared so tests can
//! check that sessions are released.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use flatcat_core::error::{Error, Result};
use flatcat_core::table::TableMatcher;

use crate::transport::{TableStream, Transport, TransportFactory};

type Tree = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

#[derive(Default)]
struct Counters {
    sessions_opened: AtomicUsize,
    sessions_closed: AtomicUsize,
    streams_opened: AtomicUsize,
}

/// Thread-safe in-memory file tree exposed as a transport.
pub struct MemoryTransport {
    data: Arc<Mutex<Tree>>,
    counters: Arc<Counters>,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        let counters = Arc::new(Counters::default());
        counters.sessions_opened.fetch_add(1, Ordering::Relaxed);
        Self {
            data: Arc::new(Mutex::new(Tree::new())),
            counters,
            closed: false,
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.data.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Create an empty schema directory.
    pub fn add_schema(&self, schema: &str) {
        self.tree().entry(schema.to_string()).or_default();
    }

    /// Pre-populate a file (creates the schema directory if needed).
    pub fn insert(&self, schema: &str, table: &str, bytes: impl Into<Vec<u8>>) {
        self.tree()
            .entry(schema.to_string())
            .or_default()
            .insert(table.to_string(), bytes.into());
    }

    pub fn remove(&self, schema: &str, table: &str) {
        if let Some(files) = self.tree().get_mut(schema) {
            files.remove(table);
        }
    }

    /// A new session over the same tree.
    pub fn session(&self) -> Self {
        self.counters.sessions_opened.fetch_add(1, Ordering::Relaxed);
        Self {
            data: Arc::clone(&self.data),
            counters: Arc::clone(&self.counters),
            closed: false,
        }
    }

    /// Factory handing out a fresh session on every `connect`.
    pub fn factory(&self) -> impl TransportFactory {
        let root = Self {
            data: Arc::clone(&self.data),
            counters: Arc::clone(&self.counters),
            closed: false,
        };
        move || -> Result<Box<dyn Transport>> { Ok(Box::new(root.session())) }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn sessions_opened(&self) -> usize {
        self.counters.sessions_opened.load(Ordering::Relaxed)
    }

    pub fn sessions_closed(&self) -> usize {
        self.counters.sessions_closed.load(Ordering::Relaxed)
    }

    /// Sessions opened over this tree and not yet closed.
    pub fn live_sessions(&self) -> usize {
        self.sessions_opened().saturating_sub(self.sessions_closed())
    }

    pub fn streams_opened(&self) -> usize {
        self.counters.streams_opened.load(Ordering::Relaxed)
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

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(op: &'static str, target: String) -> Error {
    Error::transport(
        op,
        target,
        io::Error::new(io::ErrorKind::NotFound, "path not found"),
    )
}

impl Transport for MemoryTransport {
    fn open_stream(&mut self, schema: &str, table: &str) -> Result<TableStream> {
        let target = format!("memory:/{schema}/{table}");
        self.ensure_open("open", &target)?;
        let bytes = self
            .tree()
            .get(schema)
            .and_then(|files| files.get(table))
            .cloned()
            .ok_or_else(|| not_found("open", target))?;
        self.counters.streams_opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn list_schemas(&mut self) -> Result<BTreeSet<String>> {
        self.ensure_open("list", "memory:/")?;
        Ok(self.tree().keys().cloned().collect())
    }

    fn list_tables(&mut self, schema: &str, matcher: &TableMatcher) -> Result<BTreeSet<String>> {
        let target = format!("memory:/{schema}");
        self.ensure_open("list", &target)?;
        let tree = self.tree();
        let files = tree.get(schema).ok_or_else(|| not_found("list", target))?;
        Ok(files
            .keys()
            .filter(|n| matcher.matches(n))
            .cloned()
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.counters.sessions_closed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory:/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn test_memory_listing_and_reading() {
        let mut t = MemoryTransport::new();
        t.insert("sales", "orders.csv", "id\n1\n");
        t.insert("sales", "orders_2023.csv", "id\n2\n");
        t.add_schema("empty");

        let schemas: Vec<_> = t.list_schemas().unwrap().into_iter().collect();
        assert_eq!(schemas, vec!["empty".to_string(), "sales".to_string()]);

        let pat = TableMatcher::pattern("orders").unwrap();
        assert_eq!(t.list_tables("sales", &pat).unwrap().len(), 2);
        assert!(t.list_tables("empty", &pat).unwrap().is_empty());
        assert!(t.list_tables("missing", &pat).unwrap_err().is_not_found());

        let mut s = String::new();
        t.open_stream("sales", "orders.csv")
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();
        assert_eq!(s, "id\n1\n");
        assert_eq!(t.streams_opened(), 1);
    }

    #[test]
    fn test_session_accounting() {
        let root = MemoryTransport::new();
        let mut a = root.session();
        let mut b = root.session();
        assert_eq!(root.live_sessions(), 3);

        a.close().unwrap();
        a.close().unwrap();
        b.close().unwrap();
        assert_eq!(root.live_sessions(), 1);
        assert!(a.list_schemas().is_err());
    }

    #[test]
    fn test_factory_sessions_are_independent() {
        let root = MemoryTransport::new();
        root.insert("s", "t.csv", "x");
        let factory = root.factory();
        let before = root.live_sessions();

        let mut one = factory.connect().unwrap();
        let mut two = factory.connect().unwrap();
        assert_eq!(root.live_sessions(), before + 2);

        one.close().unwrap();
        assert!(two.list_schemas().is_ok());
        two.close().unwrap();
        assert_eq!(root.live_sessions(), before);
    }
}
