//! # Typed sample-data records
//!
//! One struct per record kind, replacing the string-keyed dictionaries of raw values:
//!
//! | Kind      | Struct                                   | Key        |
//! |-----------|------------------------------------------|------------|
//! | detection | [`Detection`](crate::records::detection::Detection)       | `detID`    |
//! | tracklet  | [`Tracklet`](crate::records::tracklet::Tracklet)          | `trkID`    |
//! | object    | [`OrbitalObject`](crate::records::object::OrbitalObject)  | `objectID` |
//!
//! All three implement [`SampleRecord`], which ties a struct to its [`Schema`] and converts
//! between the typed value and the raw text fields of a sample file.
//!
//! ## Value encoding
//!
//! | Rust type      | Text                      |
//! |----------------|---------------------------|
//! | `f64`          | shortest round-trip repr (`1.0`, `1.3e-7`) |
//! | `bool`         | `True` / `False` (also reads `true`, `false`, `1`, `0`) |
//! | `Option<T>`    | the value, or `None`      |
//! | `Vec<f64>`     | `[a, b, c]`               |
pub mod detection;
pub mod object;
pub mod tracklet;

use itertools::Itertools;

use crate::{
    neo_ml_errors::NeoMlError,
    sample_data::ingest::RawRecord,
    schema::{Schema, FIELD_SEPARATOR},
};

/// Text written for a missing optional value.
pub const NONE_TOKEN: &str = "None";

/// A record that can be read from and written to a sample file.
pub trait SampleRecord: Sized {
    /// Field set of the files holding this record kind.
    const SCHEMA: Schema;

    /// Primary key of the record.
    fn key(&self) -> &str;

    /// Build the typed record from the raw text values of one row.
    fn from_raw(raw: &RawRecord) -> Result<Self, NeoMlError>;

    /// Text value of one field, in the encoding of the sample files.
    ///
    /// Returns `None` for a name that is not part of [`SampleRecord::SCHEMA`].
    fn field_value(&self, field: &str) -> Option<String>;

    /// Data line in canonical (alphabetical) column order, without trailing newline.
    fn to_line(&self) -> String {
        Self::SCHEMA
            .canonical_fields()
            .into_iter()
            .map(|name| self.field_value(name).unwrap_or_default())
            .join(FIELD_SEPARATOR)
    }
}

pub(crate) fn format_f64(value: f64) -> String {
    format!("{value:?}")
}

pub(crate) fn format_opt_f64(value: Option<f64>) -> String {
    value.map(format_f64).unwrap_or_else(|| NONE_TOKEN.to_string())
}

pub(crate) fn format_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

pub(crate) fn format_f64_list(values: &[f64]) -> String {
    format!("[{}]", values.iter().map(|v| format_f64(*v)).join(", "))
}

/// Typed accessor over the raw values of one row.
///
/// Every failure is reported as [`NeoMlError::InvalidField`] naming the record kind, its key,
/// the offending field and value.
pub(crate) struct FieldReader<'a> {
    schema: Schema,
    key: &'a str,
    raw: &'a RawRecord,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(schema: Schema, raw: &'a RawRecord) -> Self {
        let key = raw.get(schema.key).unwrap_or_default();
        FieldReader { schema, key, raw }
    }

    fn invalid(&self, field: &'static str, value: &str, reason: impl Into<String>) -> NeoMlError {
        NeoMlError::InvalidField {
            kind: self.schema.kind,
            key: self.key.to_string(),
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn string(&self, field: &'static str) -> Result<String, NeoMlError> {
        let value = self
            .raw
            .get(field)
            .ok_or_else(|| self.invalid(field, "", "missing field"))?;
        if value.is_empty() {
            return Err(self.invalid(field, value, "empty value"));
        }
        Ok(value.to_string())
    }

    pub(crate) fn f64(&self, field: &'static str) -> Result<f64, NeoMlError> {
        let value = self.string(field)?;
        value
            .parse::<f64>()
            .map_err(|e| self.invalid(field, &value, e.to_string()))
    }

    pub(crate) fn opt_f64(&self, field: &'static str) -> Result<Option<f64>, NeoMlError> {
        let value = self.string(field)?;
        if value == NONE_TOKEN {
            return Ok(None);
        }
        value
            .parse::<f64>()
            .map(Some)
            .map_err(|e| self.invalid(field, &value, e.to_string()))
    }

    pub(crate) fn opt_i32(&self, field: &'static str) -> Result<Option<i32>, NeoMlError> {
        let value = self.string(field)?;
        if value == NONE_TOKEN {
            return Ok(None);
        }
        value
            .parse::<i32>()
            .map(Some)
            .map_err(|e| self.invalid(field, &value, e.to_string()))
    }

    pub(crate) fn bool(&self, field: &'static str) -> Result<bool, NeoMlError> {
        let value = self.string(field)?;
        match value.as_str() {
            "True" | "true" | "1" => Ok(true),
            "False" | "false" | "0" => Ok(false),
            _ => Err(self.invalid(field, &value, "expected True or False")),
        }
    }

    pub(crate) fn f64_list(&self, field: &'static str) -> Result<Vec<f64>, NeoMlError> {
        let value = self.string(field)?;
        let inner = value
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| self.invalid(field, &value, "expected a bracketed list"))?;

        inner
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|e| self.invalid(field, &value, e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod records_test {
    use super::*;

    #[test]
    fn test_format_values() {
        assert_eq!(format_f64(1.0), "1.0");
        assert_eq!(format_f64(1.25e-7), "1.25e-7");
        assert_eq!(format_opt_f64(None), "None");
        assert_eq!(format_bool(true), "True");
        assert_eq!(format_f64_list(&[0.5, 2.0]), "[0.5, 2.0]");
        assert_eq!(format_f64_list(&[]), "[]");
    }

    #[test]
    fn test_formatted_floats_parse_back() {
        for v in [0.1, 1.0 / 3.0, 2.5e-9, -17.25, 2459182.9309837] {
            assert_eq!(format_f64(v).parse::<f64>().unwrap(), v);
        }
    }
}
