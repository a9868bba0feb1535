//! # Sample data files
//!
//! Reading, validating and writing the three comma-delimited sample files (detections,
//! tracklets, objects).
//!
//! * [`parser`] – header detection, bracket-aware splitting, field-count validation.
//! * [`ingest`] – keyed (and typed) mappings with primary-key uniqueness checks.
//! * [`writer`] – canonical header and batched appends.
//!
//! [`SampleData`] bundles the three catalogs of one data set.
pub mod ingest;
pub mod parser;
pub mod writer;

use camino::Utf8Path;

use crate::{
    integrity::{check_referential_integrity, IntegrityReport},
    labels::{generate_labels, LabelSet},
    neo_ml_errors::NeoMlError,
    records::{detection::Detection, object::OrbitalObject, tracklet::Tracklet},
};

use ingest::{read_detections, read_objects, read_tracklets, Catalog};

/// The detections, tracklets and objects of one data set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleData {
    pub detections: Catalog<Detection>,
    pub tracklets: Catalog<Tracklet>,
    pub objects: Catalog<OrbitalObject>,
}

impl SampleData {
    /// Read the three sample files.
    ///
    /// Each file is parsed, checked against its schema and keyed; the links between the
    /// files are not checked here, see [`SampleData::integrity_report`].
    pub fn load(
        detections: &Utf8Path,
        tracklets: &Utf8Path,
        objects: &Utf8Path,
    ) -> Result<SampleData, NeoMlError> {
        Ok(SampleData {
            detections: read_detections(detections)?,
            tracklets: read_tracklets(tracklets)?,
            objects: read_objects(objects)?,
        })
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        check_referential_integrity(&self.detections, &self.tracklets, &self.objects)
    }

    pub fn labels(&self) -> Result<LabelSet, NeoMlError> {
        generate_labels(&self.detections, &self.tracklets, &self.objects)
    }
}
