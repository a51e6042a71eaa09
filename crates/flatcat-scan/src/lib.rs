#![forbid(unsafe_code)]
//! flatcat-scan: lazy, forward-only row cursors over delimited files.
//!
//! Design intent:
//! - Strictly synchronous; one cursor per caller, no shared state.
//! - Lines are split only when the cursor advances; field text is parsed only
//!   when a getter asks for it, so bad values fail the access, not the scan.
//! - The cursor owns both the byte stream and the transport session and is the
//!   single place they are released.

pub mod classify;
pub mod cursor;
pub mod split;

pub use classify::{classify, FieldKind};
pub use cursor::{RowCursor, ScanOptions};
pub use split::{normalize_null, LineSplitter};
