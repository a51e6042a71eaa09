//! Forward-only typed row cursor over one physical table.
//!
//! The cursor owns both the byte stream and the session it came from. Lines
//! are read through a bounded buffer that is created lazily on the first
//! `advance`; fields are split at advance time but parsed only when a getter
//! touches them.

use chrono::{NaiveDate, NaiveDateTime};

use flatcat_core::config::{ConnectorConfig, ScanMode};
use flatcat_core::error::{Error, Result};
use flatcat_core::schema::{ColumnDescriptor, ColumnType};
use flatcat_core::table::ResolvedTable;
use flatcat_io::buf::BoundedLineReader;
use flatcat_io::transport::{TableStream, Transport};

use crate::classify::{self, classify, FieldKind};
use crate::split::LineSplitter;

const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Per-cursor scan settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: ScanMode,
    /// Ordinals into the table's columns, in output order. `None` keeps all.
    pub projection: Option<Vec<usize>>,
    /// Capacity of the line buffer in bytes.
    pub buffer_capacity: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: ScanMode::Declared,
            projection: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ScanOptions {
    pub fn from_config(cfg: &ConnectorConfig) -> Self {
        Self {
            mode: cfg.scan_mode,
            projection: None,
            buffer_capacity: cfg.read_buffer_bytes,
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_projection(mut self, ordinals: Vec<usize>) -> Self {
        self.projection = Some(ordinals);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// Opened, no row read yet.
    Fresh,
    /// Positioned on a row.
    Row,
    /// Input exhausted.
    Done,
    Closed,
}

/// What a getter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    Timestamp,
}

impl Access {
    fn name(self) -> &'static str {
        match self {
            Access::Boolean => "BOOLEAN",
            Access::Integer => "BIGINT",
            Access::Float => "DOUBLE",
            Access::Text => "VARCHAR",
            Access::Date => "DATE",
            Access::Timestamp => "TIMESTAMP",
        }
    }

    /// Declared column type this access is valid for, if any.
    fn declared(self) -> Option<ColumnType> {
        match self {
            Access::Boolean => Some(ColumnType::Boolean),
            Access::Integer => Some(ColumnType::BigInt),
            Access::Float => Some(ColumnType::Double),
            Access::Text => Some(ColumnType::Varchar),
            Access::Date | Access::Timestamp => None,
        }
    }

    fn accepts(self, kind: FieldKind) -> bool {
        match self {
            Access::Boolean => kind == FieldKind::Boolean,
            Access::Integer => kind == FieldKind::Integer,
            Access::Float => kind.is_numeric(),
            Access::Text => true,
            Access::Date => kind == FieldKind::Date,
            Access::Timestamp => kind == FieldKind::Timestamp,
        }
    }
}

/// Stateful single-pass row handle.
pub struct RowCursor {
    schema: String,
    table: String,
    mode: ScanMode,
    has_header: bool,
    /// Columns came from the header, so getters parse instead of guarding.
    lenient: bool,
    splitter: LineSplitter,
    columns: Vec<ColumnDescriptor>,
    ordinals: Vec<usize>,
    capacity: usize,

    stream: Option<TableStream>,
    reader: Option<BoundedLineReader<TableStream>>,
    session: Option<Box<dyn Transport>>,

    state: CursorState,
    line: String,
    fields: Vec<Option<String>>,
    kinds: Vec<Option<FieldKind>>,
    completed_bytes: u64,
}

impl RowCursor {
    /// Open `table` through `session`. The cursor takes ownership of the
    /// session; if the stream cannot be opened the session is closed before
    /// the error is returned.
    pub fn open(
        table: &ResolvedTable,
        mut session: Box<dyn Transport>,
        opts: ScanOptions,
    ) -> Result<Self> {
        let width = table.columns.len();
        let ordinals = match opts.projection {
            Some(ords) => {
                if let Some(bad) = ords.iter().copied().find(|&o| o >= width) {
                    close_quietly(session.as_mut(), &table.table_name);
                    return Err(Error::FieldIndex {
                        schema: table.schema_name.clone(),
                        table: table.table_name.clone(),
                        index: bad,
                        width,
                    });
                }
                ords
            }
            None => (0..width).collect(),
        };

        let stream = match session.open_stream(&table.schema_name, &table.table_name) {
            Ok(s) => s,
            Err(e) => {
                close_quietly(session.as_mut(), &table.table_name);
                return Err(e);
            }
        };
        tracing::trace!(
            schema = %table.schema_name,
            table = %table.table_name,
            backend = %session.describe(),
            "stream opened"
        );

        let columns = ordinals.iter().map(|&o| table.columns[o].clone()).collect();
        Ok(Self {
            schema: table.schema_name.clone(),
            table: table.table_name.clone(),
            mode: opts.mode,
            has_header: table.has_header(),
            lenient: table.columns_inferred,
            splitter: LineSplitter::new(table.delimiter()),
            columns,
            ordinals,
            capacity: opts.buffer_capacity,
            stream: Some(stream),
            reader: None,
            session: Some(session),
            state: CursorState::Fresh,
            line: String::new(),
            fields: Vec::new(),
            kinds: Vec::new(),
            completed_bytes: 0,
        })
    }

    /// Move to the next data row. Returns `false` once the input is exhausted.
    ///
    /// Only I/O can fail here; malformed values surface from the getters.
    pub fn advance(&mut self) -> Result<bool> {
        match self.state {
            CursorState::Closed => return Err(Error::State("cursor is closed".into())),
            CursorState::Done => return Ok(false),
            CursorState::Fresh | CursorState::Row => {}
        }

        if self.reader.is_none() {
            let Some(stream) = self.stream.take() else {
                return Err(Error::State("cursor has no stream".into()));
            };
            self.reader = Some(BoundedLineReader::with_capacity(self.capacity, stream));
            if self.has_header {
                self.read_line()?;
            }
        }

        loop {
            match self.read_line()? {
                None => {
                    self.state = CursorState::Done;
                    self.fields.clear();
                    self.kinds.clear();
                    tracing::trace!(
                        schema = %self.schema,
                        table = %self.table,
                        bytes = self.completed_bytes,
                        "end of input"
                    );
                    return Ok(false);
                }
                Some(()) if self.line.is_empty() => continue,
                Some(()) => break,
            }
        }

        let raw = self.splitter.split(&self.line);
        self.fields.clear();
        self.fields
            .extend(self.ordinals.iter().map(|&o| raw.get(o).cloned().flatten()));
        self.kinds.clear();
        if self.mode == ScanMode::Inferred {
            self.kinds
                .extend(self.fields.iter().map(|f| f.as_deref().map(classify)));
        }
        self.state = CursorState::Row;
        Ok(true)
    }

    fn read_line(&mut self) -> Result<Option<()>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        match reader.next_line(&mut self.line) {
            Ok(Some(n)) => {
                self.completed_bytes += n as u64;
                Ok(Some(()))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(Error::transport(
                "read",
                format!("{}/{}", self.schema, self.table),
                e,
            )),
        }
    }

    fn ensure_row(&self) -> Result<()> {
        match self.state {
            CursorState::Row => Ok(()),
            CursorState::Fresh => Err(Error::State("advance() has not been called".into())),
            CursorState::Done => Err(Error::State("cursor is exhausted".into())),
            CursorState::Closed => Err(Error::State("cursor is closed".into())),
        }
    }

    fn raw(&self, index: usize) -> Result<Option<&str>> {
        self.ensure_row()?;
        if index >= self.columns.len() {
            return Err(self.index_error(index));
        }
        Ok(self.fields.get(index).and_then(|f| f.as_deref()))
    }

    /// Field text for a typed access, after the type guard and null check.
    fn field(&self, index: usize, access: Access) -> Result<&str> {
        let value = self.raw(index)?;

        if self.mode == ScanMode::Declared && !self.lenient {
            let actual = self.columns[index].column_type;
            if access.declared() != Some(actual) {
                return Err(self.mismatch(index, access, actual.name()));
            }
        }

        let value = value.ok_or_else(|| Error::NullField {
            schema: self.schema.clone(),
            table: self.table.clone(),
            index,
        })?;

        if self.mode == ScanMode::Inferred {
            let kind = self.kinds.get(index).copied().flatten().unwrap_or(FieldKind::Text);
            if !access.accepts(kind) {
                return Err(self.mismatch(index, access, kind.name()));
            }
        }
        Ok(value)
    }

    fn index_error(&self, index: usize) -> Error {
        Error::FieldIndex {
            schema: self.schema.clone(),
            table: self.table.clone(),
            index,
            width: self.columns.len(),
        }
    }

    fn mismatch(&self, index: usize, access: Access, actual: &'static str) -> Error {
        Error::TypeMismatch {
            schema: self.schema.clone(),
            table: self.table.clone(),
            index,
            expected: access.name(),
            actual,
        }
    }

    fn parse_error(&self, index: usize, message: impl Into<String>) -> Error {
        Error::RowParse {
            schema: self.schema.clone(),
            table: self.table.clone(),
            index,
            message: message.into(),
        }
    }

    pub fn is_null(&self, index: usize) -> Result<bool> {
        Ok(self.raw(index)?.is_none())
    }

    pub fn get_boolean(&self, index: usize) -> Result<bool> {
        let v = self.field(index, Access::Boolean)?;
        classify::parse_boolean(v)
            .ok_or_else(|| self.parse_error(index, format!("'{v}' is not a boolean")))
    }

    pub fn get_integer(&self, index: usize) -> Result<i64> {
        let v = self.field(index, Access::Integer)?;
        v.trim()
            .parse::<i64>()
            .map_err(|e| self.parse_error(index, format!("'{v}': {e}")))
    }

    pub fn get_float(&self, index: usize) -> Result<f64> {
        let v = self.field(index, Access::Float)?;
        v.trim()
            .parse::<f64>()
            .map_err(|e| self.parse_error(index, format!("'{v}': {e}")))
    }

    pub fn get_text(&self, index: usize) -> Result<&str> {
        self.field(index, Access::Text)
    }

    pub fn get_date(&self, index: usize) -> Result<NaiveDate> {
        let v = self.field(index, Access::Date)?;
        classify::parse_date(v).map_err(|e| self.parse_error(index, format!("'{v}': {e}")))
    }

    pub fn get_timestamp(&self, index: usize) -> Result<NaiveDateTime> {
        let v = self.field(index, Access::Timestamp)?;
        classify::parse_timestamp(v).map_err(|e| self.parse_error(index, format!("'{v}': {e}")))
    }

    /// Declared (or header-derived) type of a projected column.
    pub fn column_type(&self, index: usize) -> Result<ColumnType> {
        self.columns
            .get(index)
            .map(|c| c.column_type)
            .ok_or_else(|| self.index_error(index))
    }

    /// Shape of the current field; `None` for null. Inferred scans use the
    /// classification made at advance time, declared scans classify on demand.
    pub fn field_kind(&self, index: usize) -> Result<Option<FieldKind>> {
        let value = self.raw(index)?;
        if self.mode == ScanMode::Inferred {
            return Ok(self.kinds.get(index).copied().flatten());
        }
        Ok(value.map(classify))
    }

    /// All projected fields of the current row, nulls as `None`.
    pub fn current_fields(&self) -> Result<&[Option<String>]> {
        self.ensure_row()?;
        Ok(&self.fields)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Raw bytes consumed so far, header and line terminators included.
    pub fn completed_bytes(&self) -> u64 {
        self.completed_bytes
    }

    pub fn is_closed(&self) -> bool {
        self.state == CursorState::Closed
    }

    /// Release the stream and the session. Safe to call more than once and
    /// before any `advance`.
    pub fn close(&mut self) -> Result<()> {
        self.state = CursorState::Closed;
        self.reader = None;
        self.stream = None;
        self.fields.clear();
        self.kinds.clear();
        match self.session.take() {
            Some(mut session) => session.close(),
            None => Ok(()),
        }
    }
}

impl Drop for RowCursor {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(
                schema = %self.schema,
                table = %self.table,
                error = %e,
                "failed to close session on drop"
            );
        }
    }
}

fn close_quietly(session: &mut dyn Transport, table: &str) {
    if let Err(e) = session.close() {
        tracing::warn!(table = %table, error = %e, "failed to close session");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use flatcat_core::table::{TableDescriptor, TableMatcher};
    use flatcat_io::memory::MemoryTransport;

    use super::*;

    fn orders_table(header: bool) -> ResolvedTable {
        let desc = TableDescriptor::new("sales", TableMatcher::literal("orders.csv").unwrap())
            .with_header(header)
            .with_columns(vec![
                ColumnDescriptor::new("id", ColumnType::BigInt),
                ColumnDescriptor::new("amount", ColumnType::Double),
                ColumnDescriptor::new("note", ColumnType::Varchar),
                ColumnDescriptor::new("paid", ColumnType::Boolean),
            ]);
        ResolvedTable::declared("orders.csv", Arc::new(desc))
    }

    fn open(root: &MemoryTransport, table: &ResolvedTable, opts: ScanOptions) -> RowCursor {
        RowCursor::open(table, Box::new(root.session()), opts).unwrap()
    }

    #[test]
    fn test_declared_scan_typed_values() {
        let root = MemoryTransport::new();
        root.insert(
            "sales",
            "orders.csv",
            "id,amount,note,paid\n1,10.5,\"a, b\",TRUE\n2,,null,false\n",
        );
        let table = orders_table(true);
        let mut c = open(&root, &table, ScanOptions::default());

        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 1);
        assert_eq!(c.get_float(1).unwrap(), 10.5);
        assert_eq!(c.get_text(2).unwrap(), "a, b");
        assert!(c.get_boolean(3).unwrap());

        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 2);
        assert!(c.is_null(1).unwrap());
        assert!(c.is_null(2).unwrap());
        assert!(matches!(c.get_float(1), Err(Error::NullField { index: 1, .. })));
        assert!(!c.get_boolean(3).unwrap());

        assert!(!c.advance().unwrap());
        assert!(!c.advance().unwrap());
        assert_eq!(c.completed_bytes(), 53);
    }

    #[test]
    fn test_type_guard_rejects_wrong_getter() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "7,1.5,x,true\n");
        let table = orders_table(false);
        let mut c = open(&root, &table, ScanOptions::default());
        assert!(c.advance().unwrap());

        match c.get_text(0) {
            Err(Error::TypeMismatch {
                index,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(index, 0);
                assert_eq!(expected, "VARCHAR");
                assert_eq!(actual, "BIGINT");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(c.get_integer(1).is_err());
        assert!(c.get_date(2).is_err());
        assert_eq!(c.column_type(1).unwrap(), ColumnType::Double);
    }

    #[test]
    fn test_short_rows_read_as_null() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "3\n");
        let table = orders_table(false);
        let mut c = open(&root, &table, ScanOptions::default());
        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 3);
        for i in 1..4 {
            assert!(c.is_null(i).unwrap());
        }
    }

    #[test]
    fn test_malformed_value_fails_only_the_getter() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "abc,1.0,x,maybe\n4,2.0,y,true\n");
        let table = orders_table(false);
        let mut c = open(&root, &table, ScanOptions::default());

        assert!(c.advance().unwrap());
        assert!(matches!(c.get_integer(0), Err(Error::RowParse { index: 0, .. })));
        assert!(matches!(c.get_boolean(3), Err(Error::RowParse { index: 3, .. })));
        assert_eq!(c.get_float(1).unwrap(), 1.0);

        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 4);
    }

    #[test]
    fn test_state_and_index_errors() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "1,1.0,x,true\n");
        let table = orders_table(false);
        let mut c = open(&root, &table, ScanOptions::default());

        assert!(matches!(c.is_null(0), Err(Error::State(_))));
        assert!(c.advance().unwrap());
        assert!(matches!(
            c.get_integer(4),
            Err(Error::FieldIndex { index: 4, width: 4, .. })
        ));
        assert!(!c.advance().unwrap());
        assert!(matches!(c.get_integer(0), Err(Error::State(_))));
    }

    #[test]
    fn test_header_and_blank_lines_skipped() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "h1,h2\r\n\r\n1,2\n\n3,4\n");
        let desc = TableDescriptor::new("sales", TableMatcher::literal("orders.csv").unwrap())
            .with_header(true)
            .with_columns(vec![
                ColumnDescriptor::new("h1", ColumnType::BigInt),
                ColumnDescriptor::new("h2", ColumnType::BigInt),
            ]);
        let table = ResolvedTable::declared("orders.csv", Arc::new(desc));
        let mut c = open(&root, &table, ScanOptions::default());

        let mut rows = Vec::new();
        while c.advance().unwrap() {
            rows.push((c.get_integer(0).unwrap(), c.get_integer(1).unwrap()));
        }
        assert_eq!(rows, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_projection_reorders_columns() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "9,2.5,memo,false\n");
        let table = orders_table(false);
        let mut c = open(
            &root,
            &table,
            ScanOptions::default().with_projection(vec![2, 0]),
        );
        assert_eq!(c.columns().len(), 2);
        assert!(c.advance().unwrap());
        assert_eq!(c.get_text(0).unwrap(), "memo");
        assert_eq!(c.get_integer(1).unwrap(), 9);
        let err = c.get_float(2).unwrap_err();
        assert!(matches!(&err, Error::FieldIndex { index: 2, width: 2, .. }));
        assert!(err.to_string().starts_with("sales.orders.csv:"));
    }

    #[test]
    fn test_bad_projection_closes_session() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "1\n");
        let table = orders_table(false);
        let before = root.live_sessions();
        let err = RowCursor::open(
            &table,
            Box::new(root.session()),
            ScanOptions::default().with_projection(vec![7]),
        )
        .err()
        .unwrap();
        assert!(matches!(&err, Error::FieldIndex { index: 7, width: 4, .. }));
        assert!(matches!(
            &err,
            Error::FieldIndex { schema, table, .. } if schema == "sales" && table == "orders.csv"
        ));
        assert_eq!(root.live_sessions(), before);
    }

    #[test]
    fn test_header_inferred_columns_parse_leniently() {
        let root = MemoryTransport::new();
        root.insert("s", "t.csv", "a,b\n12,x\n");
        let desc = TableDescriptor::new("s", TableMatcher::literal("t.csv").unwrap()).with_header(true);
        let table = ResolvedTable::inferred(
            "t.csv",
            Arc::new(desc),
            vec![ColumnDescriptor::varchar("a"), ColumnDescriptor::varchar("b")],
        );
        let mut c = open(&root, &table, ScanOptions::default());
        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 12);
        assert_eq!(c.get_text(0).unwrap(), "12");
        assert!(matches!(c.get_integer(1), Err(Error::RowParse { index: 1, .. })));
    }

    #[test]
    fn test_inferred_mode_classifies_fields() {
        let root = MemoryTransport::new();
        root.insert(
            "s",
            "t.csv",
            "42,3.5,1e3,2024-03-01,2024-03-01 08:15:00,true,hello\n2024-13-40,,x,,,,\n",
        );
        let desc = TableDescriptor::new("s", TableMatcher::literal("t.csv").unwrap()).with_columns(
            (0..7)
                .map(|i| ColumnDescriptor::varchar(format!("c{i}")))
                .collect(),
        );
        let table = ResolvedTable::declared("t.csv", Arc::new(desc));
        let mut c = open(
            &root,
            &table,
            ScanOptions::default().with_mode(ScanMode::Inferred),
        );

        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 42);
        assert_eq!(c.get_float(0).unwrap(), 42.0);
        assert_eq!(c.get_float(1).unwrap(), 3.5);
        assert!(matches!(c.get_integer(1), Err(Error::TypeMismatch { .. })));
        assert_eq!(c.get_float(2).unwrap(), 1000.0);
        assert_eq!(
            c.get_date(3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(c.get_timestamp(4).unwrap().to_string(), "2024-03-01 08:15:00");
        assert!(c.get_boolean(5).unwrap());
        assert_eq!(c.get_text(6).unwrap(), "hello");
        assert_eq!(c.field_kind(6).unwrap(), Some(FieldKind::Text));
        assert_eq!(c.get_text(0).unwrap(), "42");

        assert!(c.advance().unwrap());
        assert_eq!(c.field_kind(0).unwrap(), Some(FieldKind::Date));
        assert!(matches!(c.get_date(0), Err(Error::RowParse { index: 0, .. })));
        assert_eq!(c.field_kind(1).unwrap(), None);
        assert!(matches!(c.get_float(1), Err(Error::NullField { .. })));
    }

    #[test]
    fn test_close_is_idempotent_and_releases_session() {
        let root = MemoryTransport::new();
        root.insert("sales", "orders.csv", "1\n");
        let table = orders_table(false);
        let before = root.live_sessions();

        let mut c = open(&root, &table, ScanOptions::default());
        assert_eq!(root.live_sessions(), before + 1);
        c.close().unwrap();
        c.close().unwrap();
        assert_eq!(root.live_sessions(), before);
        assert!(matches!(c.advance(), Err(Error::State(_))));

        let c = open(&root, &table, ScanOptions::default());
        drop(c);
        assert_eq!(root.live_sessions(), before);
    }

    #[test]
    fn test_missing_file_closes_session() {
        let root = MemoryTransport::new();
        root.add_schema("sales");
        let table = orders_table(false);
        let before = root.live_sessions();
        let err = RowCursor::open(&table, Box::new(root.session()), ScanOptions::default())
            .err()
            .unwrap();
        assert!(err.is_not_found());
        assert_eq!(root.live_sessions(), before);
    }

    #[test]
    fn test_custom_delimiter_round_trip() {
        let root = MemoryTransport::new();
        let values = ["5", "0.25", "pipe|inside", "false"];
        let line = values
            .iter()
            .map(|v| if v.contains('|') { format!("\"{v}\"") } else { v.to_string() })
            .collect::<Vec<_>>()
            .join("|");
        root.insert("sales", "orders.csv", format!("{line}\n"));
        let desc = TableDescriptor::new("sales", TableMatcher::literal("orders.csv").unwrap())
            .with_delimiter("|")
            .with_columns(orders_table(false).columns);
        let table = ResolvedTable::declared("orders.csv", Arc::new(desc));

        let mut c = open(&root, &table, ScanOptions::default());
        assert!(c.advance().unwrap());
        assert_eq!(c.get_integer(0).unwrap(), 5);
        assert_eq!(c.get_float(1).unwrap(), 0.25);
        assert_eq!(c.get_text(2).unwrap(), "pipe|inside");
        assert!(!c.get_boolean(3).unwrap());
    }
}
