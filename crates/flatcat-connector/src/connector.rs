//! Host adapter: catalog metadata and row cursors behind one handle.

use std::path::PathBuf;
use std::sync::Arc;

use flatcat_catalog::{discover, load_all, resolve, Catalog, ResolveOptions};
use flatcat_core::config::ConnectorConfig;
use flatcat_core::error::{Error, Result};
use flatcat_core::schema::{index_of, ColumnDescriptor};
use flatcat_core::table::TableDescriptor;
use flatcat_io::transport::{ConfigTransportFactory, SessionGuard, TransportFactory};
use flatcat_scan::{RowCursor, ScanOptions};

/// Where table descriptions come from on each catalog pass.
#[derive(Debug, Clone)]
pub enum DescriptorSource {
    /// JSON documents re-read from a directory.
    Directory(PathBuf),
    /// One header-inferred pattern per schema for files ending in `.<suffix>`.
    Suffix { suffix: String, delimiter: String },
    /// A fixed set supplied in code.
    Fixed(Vec<TableDescriptor>),
}

impl DescriptorSource {
    pub fn from_config(cfg: &ConnectorConfig) -> Self {
        match &cfg.table_description_dir {
            Some(dir) => DescriptorSource::Directory(PathBuf::from(dir)),
            None => DescriptorSource::Suffix {
                suffix: cfg.suffix.clone(),
                delimiter: cfg.splitter.clone(),
            },
        }
    }
}

pub struct Connector {
    config: ConnectorConfig,
    factory: Arc<dyn TransportFactory>,
    source: DescriptorSource,
}

impl Connector {
    /// Build a connector whose sessions come from the configured backend.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let config = config.resolved()?;
        let factory = ConfigTransportFactory::new(config.clone())?;
        tracing::debug!(
            protocol = ?config.protocol,
            base = %config.normalized_base(),
            "connector configured"
        );
        Ok(Self {
            source: DescriptorSource::from_config(&config),
            factory: Arc::new(factory),
            config,
        })
    }

    /// Build a connector over a caller-supplied session factory.
    pub fn with_factory(config: ConnectorConfig, factory: impl TransportFactory + 'static) -> Self {
        Self {
            source: DescriptorSource::from_config(&config),
            factory: Arc::new(factory),
            config,
        }
    }

    pub fn with_descriptors(mut self, descriptors: Vec<TableDescriptor>) -> Self {
        self.source = DescriptorSource::Fixed(descriptors);
        self
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn source(&self) -> &DescriptorSource {
        &self.source
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::from_config(&self.config)
    }

    /// Resolve a fresh catalog snapshot on a dedicated session.
    pub fn catalog(&self) -> Result<Catalog> {
        let mut session = SessionGuard::acquire(self.factory.as_ref())?;
        let descriptors = match &self.source {
            DescriptorSource::Directory(dir) => load_all(dir)?,
            DescriptorSource::Suffix { suffix, delimiter } => {
                discover(&mut *session, suffix, delimiter)?
            }
            DescriptorSource::Fixed(fixed) => fixed.clone(),
        };

        let catalog = resolve(
            &descriptors,
            &mut *session,
            &ResolveOptions::from_config(&self.config),
        )?;
        session.close()?;
        tracing::debug!(
            descriptors = descriptors.len(),
            tables = catalog.len(),
            fingerprint = %catalog.fingerprint(),
            "catalog resolved"
        );
        Ok(catalog)
    }

    pub fn list_schemas(&self) -> Result<Vec<String>> {
        Ok(self.list_schemas_in(&self.catalog()?))
    }

    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        Ok(self.list_tables_in(&self.catalog()?, schema))
    }

    /// Columns of one table, or `None` when the catalog has no such table.
    pub fn get_table(&self, schema: &str, table: &str) -> Result<Option<Vec<ColumnDescriptor>>> {
        Ok(self.get_table_in(&self.catalog()?, schema, table))
    }

    /// Open a cursor over `schema.table` yielding `requested_columns` in the
    /// given order. An empty request yields every column.
    pub fn get_row_cursor(
        &self,
        schema: &str,
        table: &str,
        requested_columns: &[&str],
    ) -> Result<RowCursor> {
        let catalog = self.catalog()?;
        self.get_row_cursor_in(&catalog, schema, table, requested_columns)
    }

    pub fn list_schemas_in(&self, catalog: &Catalog) -> Vec<String> {
        catalog.list_schemas()
    }

    pub fn list_tables_in(&self, catalog: &Catalog, schema: &str) -> Vec<String> {
        catalog.list_tables(schema)
    }

    pub fn get_table_in(
        &self,
        catalog: &Catalog,
        schema: &str,
        table: &str,
    ) -> Option<Vec<ColumnDescriptor>> {
        catalog.get_table(schema, table).map(|t| t.columns.clone())
    }

    pub fn get_row_cursor_in(
        &self,
        catalog: &Catalog,
        schema: &str,
        table: &str,
        requested_columns: &[&str],
    ) -> Result<RowCursor> {
        let resolved = catalog
            .get_table(schema, table)
            .ok_or_else(|| Error::Schema(format!("unknown table {schema}.{table}")))?;

        let mut opts = self.scan_options();
        if !requested_columns.is_empty() {
            let ordinals = requested_columns
                .iter()
                .map(|name| {
                    index_of(&resolved.columns, name).ok_or_else(|| {
                        Error::Schema(format!("unknown column '{name}' in {schema}.{table}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            opts = opts.with_projection(ordinals);
        }

        let session = SessionGuard::acquire(self.factory.as_ref())?
            .into_inner()
            .ok_or_else(|| Error::State("session handed off twice".into()))?;
        RowCursor::open(resolved, session, opts)
    }
}
