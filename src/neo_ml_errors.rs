use camino::Utf8PathBuf;
use thiserror::Error;

use crate::{integrity::IntegrityReport, mpc_export::obs80::ParseObsError, schema::RecordKind};

#[derive(Error, Debug)]
pub enum NeoMlError {
    #[error("File could not be found: {0}")]
    FileNotFound(Utf8PathBuf),

    #[error("File could not be read: {path}: {source}")]
    FileRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Could not find a header line with the {kind} fields: {expected}")]
    MissingHeader { kind: RecordKind, expected: String },

    #[error("{kind} line {line}: expected {expected} fields, found {found}")]
    FieldCountMismatch {
        kind: RecordKind,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate {kind} key {key:?} at line {line} (first seen at line {first_line})")]
    DuplicateKey {
        kind: RecordKind,
        key: String,
        line: usize,
        first_line: usize,
    },

    #[error("{kind} {key:?}: invalid value {value:?} for field {field}: {reason}")]
    InvalidField {
        kind: RecordKind,
        key: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Expected a vector with 3 components, found {0}")]
    InvalidVectorShape(usize),

    #[error("Referential integrity violated:\n{0}")]
    ReferentialIntegrity(IntegrityReport),

    #[error("{kind} {key:?} references unknown {target} {reference:?}")]
    DanglingReference {
        kind: RecordKind,
        key: String,
        target: RecordKind,
        reference: String,
    },

    #[error("Error during the 80 column line parsing: {0}")]
    Obs80Error(#[from] ParseObsError),

    #[error("Unknown observatory code: {0}")]
    UnknownObservatory(String),

    #[error("Observatory {0} has no fixed geographic position")]
    ObservatoryWithoutGeometry(String),

    #[error("Invalid tracklet {trk_id}: {reason}")]
    InvalidTracklet { trk_id: String, reason: String },
}

impl PartialEq for NeoMlError {
    fn eq(&self, other: &Self) -> bool {
        use NeoMlError::*;
        match (self, other) {
            (FileNotFound(a), FileNotFound(b)) => a == b,
            (FileRead { path: a, .. }, FileRead { path: b, .. }) => a == b,

            // not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (
                MissingHeader {
                    kind: k1,
                    expected: e1,
                },
                MissingHeader {
                    kind: k2,
                    expected: e2,
                },
            ) => k1 == k2 && e1 == e2,
            (
                FieldCountMismatch {
                    kind: k1,
                    line: l1,
                    expected: e1,
                    found: f1,
                },
                FieldCountMismatch {
                    kind: k2,
                    line: l2,
                    expected: e2,
                    found: f2,
                },
            ) => k1 == k2 && l1 == l2 && e1 == e2 && f1 == f2,
            (
                DuplicateKey {
                    kind: k1,
                    key: key1,
                    line: l1,
                    first_line: fl1,
                },
                DuplicateKey {
                    kind: k2,
                    key: key2,
                    line: l2,
                    first_line: fl2,
                },
            ) => k1 == k2 && key1 == key2 && l1 == l2 && fl1 == fl2,
            (
                InvalidField {
                    kind: k1,
                    key: key1,
                    field: f1,
                    value: v1,
                    ..
                },
                InvalidField {
                    kind: k2,
                    key: key2,
                    field: f2,
                    value: v2,
                    ..
                },
            ) => k1 == k2 && key1 == key2 && f1 == f2 && v1 == v2,
            (InvalidVectorShape(a), InvalidVectorShape(b)) => a == b,
            (ReferentialIntegrity(a), ReferentialIntegrity(b)) => a == b,
            (
                DanglingReference {
                    kind: k1,
                    key: key1,
                    target: t1,
                    reference: r1,
                },
                DanglingReference {
                    kind: k2,
                    key: key2,
                    target: t2,
                    reference: r2,
                },
            ) => k1 == k2 && key1 == key2 && t1 == t2 && r1 == r2,
            (Obs80Error(a), Obs80Error(b)) => a == b,
            (UnknownObservatory(a), UnknownObservatory(b)) => a == b,
            (ObservatoryWithoutGeometry(a), ObservatoryWithoutGeometry(b)) => a == b,
            (
                InvalidTracklet {
                    trk_id: a,
                    reason: r1,
                },
                InvalidTracklet {
                    trk_id: b,
                    reason: r2,
                },
            ) => a == b && r1 == r2,

            _ => false,
        }
    }
}
