#![forbid(unsafe_code)]
//! flatcat-io: uniform file access for the catalog and the row scanner.
//!
//! - `transport`: the `Transport` trait plus local and SFTP backends.
//! - `memory`: an in-memory backend for tests and embedding.
//! - `buf`: bounded line reader with byte accounting.

pub mod buf;
pub mod memory;
pub mod transport;

pub use buf::BoundedLineReader;
pub use memory::MemoryTransport;
pub use transport::{
    build_transport_from_config, ConfigTransportFactory, LocalTransport, SessionGuard, Transport,
    TransportFactory,
};
#[cfg(feature = "sftp")]
pub use transport::SftpTransport;
