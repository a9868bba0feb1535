//! # Sample-file writer
//!
//! Writes records in the canonical layout: a `#` header with the fields sorted
//! alphabetically, then one line per record with the values in the same order, separated by
//! `" , "`.
//!
//! Large outputs are produced in batches: [`SampleFileWriter::create`] truncates the file and
//! writes the header, and every later [`SampleFileWriter::append`] opens the file in append
//! mode, writes one batch of records and closes it again.
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};

use crate::{neo_ml_errors::NeoMlError, records::SampleRecord, schema::Schema};

/// Write `records` to `path` with a canonical header, replacing any existing file.
pub fn write_sample_file<'a, R, I>(path: &Utf8Path, records: I) -> Result<usize, NeoMlError>
where
    R: SampleRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let writer = SampleFileWriter::create(path, R::SCHEMA)?;
    let count = writer.append(records)?;
    log::info!("created {path} ({count} {} records)", R::SCHEMA.kind);
    Ok(count)
}

/// Append-mode writer for one sample file.
#[derive(Debug, Clone)]
pub struct SampleFileWriter {
    path: Utf8PathBuf,
    schema: Schema,
}

impl SampleFileWriter {
    /// Create (or truncate) `path` and write the canonical header of `schema`.
    pub fn create(path: &Utf8Path, schema: Schema) -> Result<Self, NeoMlError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        writeln!(file, "{}", schema.canonical_header())?;
        Ok(SampleFileWriter {
            path: path.to_path_buf(),
            schema,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Append one batch of records and return how many were written.
    pub fn append<'a, R, I>(&self, records: I) -> Result<usize, NeoMlError>
    where
        R: SampleRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        debug_assert_eq!(R::SCHEMA, self.schema);

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        let mut count = 0;
        for record in records {
            writeln!(out, "{}", record.to_line())?;
            count += 1;
        }
        out.flush()?;

        log::debug!("appended {count} {} records to {}", self.schema.kind, self.path);
        Ok(count)
    }
}
