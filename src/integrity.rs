//! # Referential integrity between the three sample files
//!
//! Detections point to tracklets (`trkID`) and tracklets point to objects (`objectID`).
//! Both relations must be closed in both directions:
//!
//! ```text
//! detections.trkID  ⊆ keys(tracklets)     and  keys(tracklets) ⊆ detections.trkID
//! tracklets.objectID ⊆ keys(objects)      and  keys(objects)   ⊆ tracklets.objectID
//! ```
//!
//! [`check_referential_integrity`] never stops at the first problem; it collects every key
//! present on one side only into an [`IntegrityReport`], which renders as a table.
use std::collections::BTreeSet;
use std::fmt;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Row, Table};

use crate::{
    constants::{ObjectId, TrkId},
    neo_ml_errors::NeoMlError,
    records::{detection::Detection, object::OrbitalObject, tracklet::Tracklet},
    sample_data::ingest::Catalog,
};

/// Keys found on one side of a relation only. Every list is sorted and free of repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// `trkID`s referenced by at least one detection but absent from the tracklet file.
    pub unknown_tracklets: Vec<TrkId>,
    /// Tracklets that no detection references.
    pub tracklets_without_detections: Vec<TrkId>,
    /// `objectID`s referenced by at least one tracklet but absent from the object file.
    pub unknown_objects: Vec<ObjectId>,
    /// Objects that no tracklet references.
    pub objects_without_tracklets: Vec<ObjectId>,
}

impl IntegrityReport {
    /// True when both relations are closed in both directions.
    pub fn is_closed(&self) -> bool {
        self.problem_count() == 0
    }

    pub fn problem_count(&self) -> usize {
        self.unknown_tracklets.len()
            + self.tracklets_without_detections.len()
            + self.unknown_objects.len()
            + self.objects_without_tracklets.len()
    }

    /// `Ok(())` for a closed report, [`NeoMlError::ReferentialIntegrity`] otherwise.
    pub fn into_result(self) -> Result<(), NeoMlError> {
        if self.is_closed() {
            Ok(())
        } else {
            Err(NeoMlError::ReferentialIntegrity(self))
        }
    }

    fn rows(&self) -> Vec<(&'static str, &str, &'static str)> {
        let groups: [(&Vec<String>, &'static str, &'static str); 4] = [
            (
                &self.unknown_tracklets,
                "detection → tracklet",
                "trkID referenced by a detection, missing from tracklets",
            ),
            (
                &self.tracklets_without_detections,
                "detection → tracklet",
                "tracklet without any detection",
            ),
            (
                &self.unknown_objects,
                "tracklet → object",
                "objectID referenced by a tracklet, missing from objects",
            ),
            (
                &self.objects_without_tracklets,
                "tracklet → object",
                "object without any tracklet",
            ),
        ];
        groups
            .into_iter()
            .flat_map(|(ids, relation, problem)| {
                ids.iter().map(move |id| (relation, id.as_str(), problem))
            })
            .collect()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            return write!(f, "Referential integrity: all links resolved");
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Relation", "Key", "Problem"]);
        for (relation, key, problem) in self.rows() {
            table.add_row(Row::from(vec![relation, key, problem]));
        }

        writeln!(
            f,
            "Referential integrity: {} unmatched key(s)",
            self.problem_count()
        )?;
        write!(f, "{table}")
    }
}

/// Split the two sides of a relation into (referenced but unknown, known but unreferenced).
fn one_sided<'a>(
    referenced: BTreeSet<&'a str>,
    keys: BTreeSet<&'a str>,
) -> (Vec<String>, Vec<String>) {
    let unknown = referenced.difference(&keys).map(|k| k.to_string()).collect();
    let unreferenced = keys.difference(&referenced).map(|k| k.to_string()).collect();
    (unknown, unreferenced)
}

/// Check that detections, tracklets and objects reference each other consistently.
///
/// Arguments
/// -----------------
/// * `detections`, `tracklets`, `objects`: the keyed catalogs of the three sample files.
///
/// Return
/// ----------
/// * An [`IntegrityReport`] listing every key that appears on one side of a relation only.
///   Use [`IntegrityReport::is_closed`] or [`IntegrityReport::into_result`] to decide.
pub fn check_referential_integrity(
    detections: &Catalog<Detection>,
    tracklets: &Catalog<Tracklet>,
    objects: &Catalog<OrbitalObject>,
) -> IntegrityReport {
    let (unknown_tracklets, tracklets_without_detections) = one_sided(
        detections.values().map(|d| d.trk_id.as_str()).collect(),
        tracklets.keys().map(String::as_str).collect(),
    );
    let (unknown_objects, objects_without_tracklets) = one_sided(
        tracklets.values().map(|t| t.object_id.as_str()).collect(),
        objects.keys().map(String::as_str).collect(),
    );

    let report = IntegrityReport {
        unknown_tracklets,
        tracklets_without_detections,
        unknown_objects,
        objects_without_tracklets,
    };
    if !report.is_closed() {
        log::warn!(
            "referential integrity check found {} unmatched key(s)",
            report.problem_count()
        );
    }
    report
}
