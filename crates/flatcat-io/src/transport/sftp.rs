use std::collections::BTreeSet;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use flatcat_core::config::{normalize_base, ConnectorConfig};
use flatcat_core::error::{Error, Result};
use flatcat_core::table::TableMatcher;
use ssh2::{ErrorCode, Session, Sftp};

use super::{join_path, TableStream, Transport};

// libssh2 SFTP status codes.
const LIBSSH2_FX_NO_SUCH_FILE: i32 = 2;
const LIBSSH2_FX_PERMISSION_DENIED: i32 = 3;
const LIBSSH2_FX_NO_SUCH_PATH: i32 = 10;

/// Remote transport over an authenticated SFTP channel.
pub struct SftpTransport {
    base: String,
    label: String,
    session: Option<Session>,
    sftp: Option<Sftp>,
}

fn ssh_err(e: ssh2::Error) -> io::Error {
    let kind = match e.code() {
        ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_FILE) | ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_PATH) => {
            io::ErrorKind::NotFound
        }
        ErrorCode::SFTP(LIBSSH2_FX_PERMISSION_DENIED) => io::ErrorKind::PermissionDenied,
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, e)
}

fn closed_err() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "session closed")
}

impl SftpTransport {
    /// Connect, authenticate with username/password, and open the SFTP
    /// subsystem. `connect_timeout_ms` bounds the TCP connect and every
    /// libssh2 call up to the open channel; reads and listings after that
    /// have no timeout.
    pub fn connect(cfg: &ConnectorConfig) -> Result<Self> {
        let host = cfg
            .host
            .as_deref()
            .ok_or_else(|| Error::Config("sftp requires a host".into()))?;
        let username = cfg
            .username
            .as_deref()
            .ok_or_else(|| Error::Config("sftp requires a username".into()))?;
        let label = format!("sftp://{}@{}:{}", username, host, cfg.port);
        let timeout = Duration::from_millis(cfg.connect_timeout_ms);

        let addr = (host, cfg.port)
            .to_socket_addrs()
            .map_err(|e| Error::transport("resolve", &label, e))?
            .next()
            .ok_or_else(|| {
                Error::transport(
                    "resolve",
                    &label,
                    io::Error::new(io::ErrorKind::NotFound, "host has no address"),
                )
            })?;
        let tcp = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| Error::transport("connect", &label, e))?;

        let mut session = Session::new().map_err(|e| Error::transport("connect", &label, ssh_err(e)))?;
        session.set_timeout(cfg.connect_timeout_ms.min(u32::MAX as u64) as u32);
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| Error::transport("handshake", &label, ssh_err(e)))?;
        session
            .userauth_password(username, cfg.password.as_deref().unwrap_or(""))
            .map_err(|e| {
                Error::transport(
                    "authenticate",
                    &label,
                    io::Error::new(io::ErrorKind::PermissionDenied, e),
                )
            })?;
        if !session.authenticated() {
            return Err(Error::transport(
                "authenticate",
                &label,
                io::Error::new(io::ErrorKind::PermissionDenied, "authentication rejected"),
            ));
        }
        let sftp = session
            .sftp()
            .map_err(|e| Error::transport("open channel", &label, ssh_err(e)))?;
        // 0 disables the libssh2 timeout for the rest of the session.
        session.set_timeout(0);

        tracing::debug!(backend = %label, "sftp channel established");
        Ok(Self {
            base: normalize_base(&cfg.base),
            label,
            session: Some(session),
            sftp: Some(sftp),
        })
    }

    fn channel(&self, op: &'static str, target: &str) -> Result<&Sftp> {
        self.sftp
            .as_ref()
            .ok_or_else(|| Error::transport(op, target, closed_err()))
    }

    /// Entry names under `dir` whose directory flag equals `dirs`.
    fn read_names(&self, dir: &str, dirs: bool) -> Result<Vec<String>> {
        let sftp = self.channel("list", dir)?;
        let entries = sftp
            .readdir(Path::new(dir))
            .map_err(|e| Error::transport("list", dir, ssh_err(e)))?;
        Ok(entries
            .into_iter()
            .filter(|(_, stat)| stat.is_dir() == dirs)
            .filter_map(|(path, _)| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
            })
            .filter(|n| n != "." && n != "..")
            .collect())
    }
}

impl Transport for SftpTransport {
    fn open_stream(&mut self, schema: &str, table: &str) -> Result<TableStream> {
        let path = join_path(&self.base, &[schema, table]);
        let sftp = self.channel("open", &path)?;
        let file = sftp
            .open(Path::new(&path))
            .map_err(|e| Error::transport("open", &path, ssh_err(e)))?;
        Ok(Box::new(file))
    }

    fn list_schemas(&mut self) -> Result<BTreeSet<String>> {
        let base = self.base.clone();
        Ok(self.read_names(&base, true)?.into_iter().collect())
    }

    fn list_tables(&mut self, schema: &str, matcher: &TableMatcher) -> Result<BTreeSet<String>> {
        let dir = join_path(&self.base, &[schema]);
        Ok(self
            .read_names(&dir, false)?
            .into_iter()
            .filter(|n| matcher.matches(n))
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        // Channel first, then the network session; either may already be gone.
        drop(self.sftp.take());
        if let Some(session) = self.session.take() {
            session
                .disconnect(None, "closing", None)
                .map_err(|e| Error::transport("disconnect", &self.label, ssh_err(e)))?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}{}", self.label, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(code: ErrorCode) -> io::ErrorKind {
        ssh_err(ssh2::Error::new(code, "sftp status")).kind()
    }

    #[test]
    fn test_status_codes_map_to_io_kinds() {
        assert_eq!(kind(ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_FILE)), io::ErrorKind::NotFound);
        assert_eq!(kind(ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_PATH)), io::ErrorKind::NotFound);
        assert_eq!(
            kind(ErrorCode::SFTP(LIBSSH2_FX_PERMISSION_DENIED)),
            io::ErrorKind::PermissionDenied
        );
        assert_eq!(kind(ErrorCode::SFTP(4)), io::ErrorKind::Other);
        // Session-level codes share numbers with SFTP ones but are not path errors.
        assert_eq!(kind(ErrorCode::Session(-2)), io::ErrorKind::Other);
    }

    #[test]
    fn test_missing_remote_path_is_not_found() {
        let err = Error::transport(
            "list",
            "/exports/absent",
            ssh_err(ssh2::Error::new(ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_FILE), "no such file")),
        );
        assert!(err.is_not_found());
    }
}
