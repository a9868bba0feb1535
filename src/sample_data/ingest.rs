//! # Keyed ingestion
//!
//! Turns parsed rows into mappings keyed by the primary-key field of the record kind:
//!
//! 1. [`RawTable`] – key → (field name → raw text value), checking key uniqueness.
//! 2. [`Catalog`] – key → typed record, through [`SampleRecord::from_raw`].
//!
//! The `read_*` helpers chain file parsing, keyed ingestion and typed conversion for each
//! record kind.
use std::collections::BTreeMap;

use camino::Utf8Path;

use super::parser::{parse_sample_file, ParsedFile};
use crate::{
    neo_ml_errors::NeoMlError,
    records::{detection::Detection, object::OrbitalObject, tracklet::Tracklet, SampleRecord},
    schema::Schema,
};

/// Typed records keyed (and ordered) by their primary key.
pub type Catalog<R> = BTreeMap<String, R>;

/// Raw text values of one row, keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source file.
    pub line: usize,
    pub values: BTreeMap<&'static str, String>,
}

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}

/// Rows of one sample file keyed by primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub schema: Schema,
    pub records: BTreeMap<String, RawRecord>,
}

impl RawTable {
    /// Key the rows of `parsed` by the primary-key field of `schema`.
    ///
    /// Arguments
    /// -----------------
    /// * `parsed`: header and rows, as returned by the parser for the same `schema`.
    /// * `schema`: record kind of the file.
    ///
    /// Return
    /// ----------
    /// * The keyed table.
    ///
    /// Errors
    /// ----------
    /// * [`NeoMlError::DuplicateKey`] when two rows share a key; the error names the key and
    ///   both line numbers.
    /// * [`NeoMlError::MissingHeader`] if the header of `parsed` does not match `schema`.
    pub fn from_parsed(parsed: ParsedFile, schema: Schema) -> Result<Self, NeoMlError> {
        // Resolve header names to the schema's static names once.
        let columns = parsed
            .header
            .iter()
            .map(|name| schema.field_names().find(|f| *f == name.as_str()))
            .collect::<Option<Vec<&'static str>>>()
            .filter(|_| schema.matches_header(&parsed.header))
            .ok_or_else(|| NeoMlError::MissingHeader {
                kind: schema.kind,
                expected: schema.field_names().collect::<Vec<_>>().join(", "),
            })?;

        let mut records: BTreeMap<String, RawRecord> = BTreeMap::new();
        for row in parsed.rows {
            let values: BTreeMap<&'static str, String> =
                columns.iter().copied().zip(row.fields).collect();
            let key = values.get(schema.key).cloned().unwrap_or_default();

            if let Some(first) = records.get(&key) {
                return Err(NeoMlError::DuplicateKey {
                    kind: schema.kind,
                    key,
                    line: row.line,
                    first_line: first.line,
                });
            }
            records.insert(
                key,
                RawRecord {
                    line: row.line,
                    values,
                },
            );
        }

        Ok(RawTable { schema, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert every row into a typed record.
    pub fn typed<R: SampleRecord>(&self) -> Result<Catalog<R>, NeoMlError> {
        self.records
            .iter()
            .map(|(key, raw)| Ok((key.clone(), R::from_raw(raw)?)))
            .collect()
    }
}

/// Parse and key a sample file.
pub fn read_table(path: &Utf8Path, schema: Schema) -> Result<RawTable, NeoMlError> {
    let parsed = parse_sample_file(path, &schema)?;
    RawTable::from_parsed(parsed, schema)
}

/// Parse, key and type a sample file holding records of kind `R`.
pub fn read_catalog<R: SampleRecord>(path: &Utf8Path) -> Result<Catalog<R>, NeoMlError> {
    let catalog = read_table(path, R::SCHEMA)?.typed::<R>()?;
    log::info!(
        "read {} {} records from {path}",
        catalog.len(),
        R::SCHEMA.kind
    );
    Ok(catalog)
}

/// Read a detection file keyed on `detID`.
pub fn read_detections(path: &Utf8Path) -> Result<Catalog<Detection>, NeoMlError> {
    read_catalog(path)
}

/// Read a tracklet file keyed on `trkID`.
pub fn read_tracklets(path: &Utf8Path) -> Result<Catalog<Tracklet>, NeoMlError> {
    read_catalog(path)
}

/// Read an object file keyed on `objectID`.
pub fn read_objects(path: &Utf8Path) -> Result<Catalog<OrbitalObject>, NeoMlError> {
    read_catalog(path)
}
