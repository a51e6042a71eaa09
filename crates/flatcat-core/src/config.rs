//! Connector configuration that hosts can serialize/deserialize.
//!
//! A config can be built from YAML, from `FLATCAT_*` environment variables, or
//! in code. A `uri` such as `sftp://user:pw@host:2222/data` or
//! `file:///data` overrides the individual backend fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_SFTP_PORT: u16 = 22;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Storage backend holding the data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[serde(alias = "file")]
    Local,
    Sftp,
}

impl Protocol {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "file" => Ok(Protocol::Local),
            "sftp" => Ok(Protocol::Sftp),
            other => Err(Error::Config(format!("unsupported protocol '{other}'"))),
        }
    }
}

/// How a row cursor interprets field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Getters are checked against the declared column type.
    Declared,
    /// Each field is classified by its shape when the line is split; the
    /// classification decides which getters succeed.
    Inferred,
}

impl ScanMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declared" => Ok(ScanMode::Declared),
            "inferred" => Ok(ScanMode::Inferred),
            other => Err(Error::Config(format!("unsupported scan mode '{other}'"))),
        }
    }
}

impl Default for ScanMode {
    fn default() -> Self {
        ScanMode::Declared
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub protocol: Protocol,

    /// Root directory; each sub-directory is a schema.
    pub base: String,

    /// Optional fully-qualified location (e.g., `sftp://user@host:22/data`).
    pub uri: Option<String>,

    /// Directory of JSON table descriptions. When absent, tables are discovered
    /// by `suffix` and their columns come from the header line.
    pub table_description_dir: Option<String>,

    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_timeout_ms: u64,

    /// Delimiter used for suffix-discovered tables.
    pub splitter: String,
    /// File suffix (without the dot) used for suffix-discovered tables.
    pub suffix: String,

    pub scan_mode: ScanMode,

    /// Treat a missing schema directory as "no tables" instead of an error.
    pub skip_missing_schemas: bool,

    /// Capacity of the buffered line reader used by cursors.
    pub read_buffer_bytes: usize,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Local,
            base: "/".to_string(),
            uri: None,
            table_description_dir: None,
            host: None,
            port: DEFAULT_SFTP_PORT,
            username: None,
            password: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            splitter: ",".to_string(),
            suffix: "csv".to_string(),
            scan_mode: ScanMode::Declared,
            skip_missing_schemas: true,
            read_buffer_bytes: 64 * 1024,
        }
    }
}

impl ConnectorConfig {
    pub fn local(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.resolved()
    }

    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        Self::from_yaml_str(&text)
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FLATCAT_PROTOCOL`: `local` or `sftp`
    /// - `FLATCAT_BASE`: base directory
    /// - `FLATCAT_URI`: full backend URI (overrides the individual fields)
    /// - `FLATCAT_TABLE_DESCRIPTION_DIR`: descriptor directory
    /// - `FLATCAT_HOST`, `FLATCAT_PORT`, `FLATCAT_USERNAME`, `FLATCAT_PASSWORD`
    /// - `FLATCAT_SPLITTER`, `FLATCAT_SUFFIX`: suffix-discovery defaults
    /// - `FLATCAT_SCAN_MODE`: `declared` or `inferred`
    /// - `FLATCAT_SKIP_MISSING_SCHEMAS`: `true`/`false`
    /// - `FLATCAT_READ_BUFFER_BYTES`: line reader capacity
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("FLATCAT_PROTOCOL") {
            cfg.protocol = Protocol::parse(&s)?;
        }

        if let Some(s) = lookup("FLATCAT_BASE") {
            cfg.base = s;
        }

        if let Some(s) = lookup("FLATCAT_URI") {
            cfg.uri = Some(s);
        }

        if let Some(s) = lookup("FLATCAT_TABLE_DESCRIPTION_DIR") {
            cfg.table_description_dir = Some(s);
        }

        if let Some(s) = lookup("FLATCAT_HOST") {
            cfg.host = Some(s);
        }

        if let Some(s) = lookup("FLATCAT_PORT") {
            cfg.port = s
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("FLATCAT_PORT '{s}': {e}")))?;
        }

        if let Some(s) = lookup("FLATCAT_USERNAME") {
            cfg.username = Some(s);
        }

        if let Some(s) = lookup("FLATCAT_PASSWORD") {
            cfg.password = Some(s);
        }

        if let Some(s) = lookup("FLATCAT_SPLITTER") {
            cfg.splitter = s;
        }

        if let Some(s) = lookup("FLATCAT_SUFFIX") {
            cfg.suffix = s;
        }

        if let Some(s) = lookup("FLATCAT_SCAN_MODE") {
            cfg.scan_mode = ScanMode::parse(&s)?;
        }

        if let Some(s) = lookup("FLATCAT_SKIP_MISSING_SCHEMAS") {
            cfg.skip_missing_schemas = s.trim().parse::<bool>().map_err(|e| {
                Error::Config(format!("FLATCAT_SKIP_MISSING_SCHEMAS '{s}': {e}"))
            })?;
        }

        if let Some(s) = lookup("FLATCAT_READ_BUFFER_BYTES") {
            cfg.read_buffer_bytes = s
                .trim()
                .parse::<usize>()
                .map_err(|e| Error::Config(format!("FLATCAT_READ_BUFFER_BYTES '{s}': {e}")))?;
        }

        cfg.resolved()
    }

    /// Fold `uri` into the individual fields, then validate.
    pub fn resolved(mut self) -> Result<Self> {
        if let Some(uri) = self.uri.clone() {
            self.apply_uri(&uri)?;
        }
        self.validate()?;
        Ok(self)
    }

    fn apply_uri(&mut self, uri: &str) -> Result<()> {
        let parsed =
            Url::parse(uri).map_err(|e| Error::Config(format!("malformed uri '{uri}': {e}")))?;
        match parsed.scheme() {
            "file" => {
                self.protocol = Protocol::Local;
                self.base = parsed.path().to_string();
            }
            "sftp" => {
                self.protocol = Protocol::Sftp;
                let host = parsed
                    .host_str()
                    .ok_or_else(|| Error::Config(format!("uri '{uri}' has no host")))?;
                self.host = Some(host.to_string());
                if let Some(port) = parsed.port() {
                    self.port = port;
                }
                if !parsed.username().is_empty() {
                    self.username = Some(parsed.username().to_string());
                }
                if let Some(pw) = parsed.password() {
                    self.password = Some(pw.to_string());
                }
                self.base = parsed.path().to_string();
            }
            other => return Err(Error::Config(format!("unsupported uri scheme '{other}'"))),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.base.trim().is_empty() {
            return Err(Error::Config("base path must not be empty".into()));
        }
        if let Some(dir) = &self.table_description_dir {
            if dir.trim().is_empty() {
                return Err(Error::Config(
                    "table_description_dir must not be empty when set".into(),
                ));
            }
        }
        if self.splitter.is_empty() {
            return Err(Error::Config("splitter must not be empty".into()));
        }
        if self.suffix.trim().is_empty() {
            return Err(Error::Config("suffix must not be empty".into()));
        }
        if self.read_buffer_bytes == 0 {
            return Err(Error::Config("read_buffer_bytes must be positive".into()));
        }
        if self.protocol == Protocol::Sftp {
            if self.host.as_deref().map_or(true, |h| h.trim().is_empty()) {
                return Err(Error::Config("sftp requires a host".into()));
            }
            if self.username.as_deref().map_or(true, |u| u.is_empty()) {
                return Err(Error::Config("sftp requires a username".into()));
            }
            if self.port == 0 {
                return Err(Error::Config("sftp port must be non-zero".into()));
            }
        }
        Ok(())
    }

    /// Base directory with a leading separator and no trailing one.
    pub fn normalized_base(&self) -> String {
        normalize_base(&self.base)
    }
}

/// Normalize a base path so it always starts with a path separator and never
/// ends with one. The filesystem root normalizes to `/`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') || trimmed.starts_with('\\') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
