//! Transport adapters: one contract for reaching delimited files.
//!
//! - `local`: filesystem under a base directory (default).
//! - `sftp`: remote files over an authenticated SFTP channel (feature `sftp`).
//!
//! Also exposes `TransportFactory`, which hands every catalog pass and every
//! cursor its own session, and `SessionGuard`, which closes a session on all
//! exit paths.

mod local;
pub use local::LocalTransport;

#[cfg(feature = "sftp")]
mod sftp;
#[cfg(feature = "sftp")]
pub use sftp::SftpTransport;

use std::collections::BTreeSet;
use std::io::Read;
use std::ops::{Deref, DerefMut};

use flatcat_core::config::{ConnectorConfig, Protocol};
use flatcat_core::error::Result;
use flatcat_core::table::TableMatcher;

/// Byte stream over one physical table.
pub type TableStream = Box<dyn Read + Send>;

/// A session against one storage backend.
///
/// A session is owned by exactly one caller; implementations need not be
/// `Sync`. `close` must be idempotent.
pub trait Transport: Send {
    /// Open `base/schema/table` for reading.
    fn open_stream(&mut self, schema: &str, table: &str) -> Result<TableStream>;

    /// Names of the sub-directories of the base path.
    fn list_schemas(&mut self) -> Result<BTreeSet<String>>;

    /// Names of the non-directory entries of `base/schema` accepted by `matcher`.
    fn list_tables(&mut self, schema: &str, matcher: &TableMatcher) -> Result<BTreeSet<String>>;

    /// Release the underlying connection. Safe to call more than once.
    fn close(&mut self) -> Result<()>;

    /// Short label for logs and error messages.
    fn describe(&self) -> String;
}

/// Source of fresh sessions.
pub trait TransportFactory: Send + Sync {
    fn connect(&self) -> Result<Box<dyn Transport>>;
}

impl<F> TransportFactory for F
where
    F: Fn() -> Result<Box<dyn Transport>> + Send + Sync,
{
    fn connect(&self) -> Result<Box<dyn Transport>> {
        self()
    }
}

/// Factory that builds the backend named by a `ConnectorConfig`.
#[derive(Debug, Clone)]
pub struct ConfigTransportFactory {
    cfg: ConnectorConfig,
}

impl ConfigTransportFactory {
    pub fn new(cfg: ConnectorConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.cfg
    }
}

impl TransportFactory for ConfigTransportFactory {
    fn connect(&self) -> Result<Box<dyn Transport>> {
        build_transport_from_config(&self.cfg)
    }
}

/// Scoped session: closes the wrapped transport when dropped unless it was
/// closed explicitly first.
pub struct SessionGuard {
    inner: Option<Box<dyn Transport>>,
}

impl SessionGuard {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        tracing::debug!(backend = %transport.describe(), "session opened");
        Self {
            inner: Some(transport),
        }
    }

    pub fn acquire(factory: &dyn TransportFactory) -> Result<Self> {
        Ok(Self::new(factory.connect()?))
    }

    /// Close now and surface any error.
    pub fn close(mut self) -> Result<()> {
        match self.inner.take() {
            Some(mut t) => close_logged(t.as_mut()),
            None => Ok(()),
        }
    }

    /// Hand the session to a new owner without closing it.
    pub fn into_inner(mut self) -> Option<Box<dyn Transport>> {
        self.inner.take()
    }
}

fn close_logged(t: &mut dyn Transport) -> Result<()> {
    let backend = t.describe();
    let res = t.close();
    tracing::debug!(backend = %backend, ok = res.is_ok(), "session closed");
    res
}

impl Deref for SessionGuard {
    type Target = dyn Transport;

    fn deref(&self) -> &Self::Target {
        match &self.inner {
            Some(t) => t.as_ref(),
            None => unreachable!("session used after hand-off"),
        }
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.inner {
            Some(t) => t.as_mut(),
            None => unreachable!("session used after hand-off"),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(mut t) = self.inner.take() {
            if let Err(e) = close_logged(t.as_mut()) {
                tracing::warn!(error = %e, "failed to close session on drop");
            }
        }
    }
}

/// Build the correct transport backend using the provided configuration.
pub fn build_transport_from_config(cfg: &ConnectorConfig) -> Result<Box<dyn Transport>> {
    match cfg.protocol {
        Protocol::Local => Ok(Box::new(LocalTransport::new(&cfg.base))),
        Protocol::Sftp => {
            #[cfg(feature = "sftp")]
            {
                let transport = SftpTransport::connect(cfg)?;
                Ok(Box::new(transport))
            }

            #[cfg(not(feature = "sftp"))]
            {
                Err(flatcat_core::error::Error::Config(
                    "flatcat was built without the `sftp` feature; rebuild with `--features flatcat-io/sftp`"
                        .into(),
                ))
            }
        }
    }
}

/// Join a normalized base with further path segments using `/`.
pub(crate) fn join_path(base: &str, parts: &[&str]) -> String {
    let mut out = if base == "/" {
        String::new()
    } else {
        base.to_string()
    };
    for p in parts {
        out.push('/');
        out.push_str(p);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/data", &["sales", "orders.csv"]), "/data/sales/orders.csv");
        assert_eq!(join_path("/", &["sales"]), "/sales");
        assert_eq!(join_path("/", &[]), "/");
        assert_eq!(join_path("/data", &[]), "/data");
    }

    #[cfg(not(feature = "sftp"))]
    #[test]
    fn test_sftp_without_feature_fails() {
        let mut cfg = ConnectorConfig::local("/data");
        cfg.protocol = Protocol::Sftp;
        cfg.host = Some("localhost".into());
        cfg.username = Some("u".into());
        let err = build_transport_from_config(&cfg).err().expect("feature missing");
        assert!(err
            .to_string()
            .contains("flatcat was built without the `sftp` feature"));
    }

    #[test]
    fn test_factory_rejects_invalid_config() {
        let mut cfg = ConnectorConfig::local("/data");
        cfg.suffix = String::new();
        assert!(ConfigTransportFactory::new(cfg).is_err());
    }
}
