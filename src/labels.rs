//! # NEO label propagation
//!
//! Known objects carry an `isNEO` flag. For supervised learning the flag is copied down the
//! references: each tracklet takes the flag of its object, and each detection takes the
//! derived flag of its tracklet, so that
//!
//! ```text
//! detection_label(d) == object(tracklet(d).objectID).isNEO
//! ```
//!
//! The catalogs are only borrowed; the labels live in a separate [`LabelSet`].
use std::collections::BTreeMap;
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Table};

use crate::{
    constants::{DetId, TrkId},
    neo_ml_errors::NeoMlError,
    records::{detection::Detection, object::OrbitalObject, tracklet::Tracklet},
    sample_data::ingest::Catalog,
    schema::RecordKind,
};

/// Derived NEO labels for tracklets and detections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pub tracklet_labels: BTreeMap<TrkId, bool>,
    pub detection_labels: BTreeMap<DetId, bool>,
}

impl LabelSet {
    pub fn tracklet_label(&self, trk_id: &str) -> Option<bool> {
        self.tracklet_labels.get(trk_id).copied()
    }

    pub fn detection_label(&self, det_id: &str) -> Option<bool> {
        self.detection_labels.get(det_id).copied()
    }

    /// Number of (detection, tracklet) labels set to NEO.
    pub fn neo_count(&self) -> (usize, usize) {
        (
            self.detection_labels.values().filter(|l| **l).count(),
            self.tracklet_labels.values().filter(|l| **l).count(),
        )
    }

    /// Number of (detection, tracklet) labels set to non-NEO.
    pub fn non_neo_count(&self) -> (usize, usize) {
        (
            self.detection_labels.values().filter(|l| !**l).count(),
            self.tracklet_labels.values().filter(|l| !**l).count(),
        )
    }

    /// Detection labels as a flat array, ordered by `detID`.
    pub fn detection_label_array(&self) -> Vec<bool> {
        self.detection_labels.values().copied().collect()
    }

    /// Tracklet labels as a flat array, ordered by `trkID`.
    pub fn tracklet_label_array(&self) -> Vec<bool> {
        self.tracklet_labels.values().copied().collect()
    }
}

impl fmt::Display for LabelSet {
    /// One row per tracklet, then one row per detection, each ordered by id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Kind", "ID", "isNEO"]);
        let rows = self
            .tracklet_labels
            .iter()
            .map(|(id, label)| ("tracklet", id, label))
            .chain(
                self.detection_labels
                    .iter()
                    .map(|(id, label)| ("detection", id, label)),
            );
        for (kind, id, label) in rows {
            table.add_row(vec![kind.to_string(), id.clone(), label.to_string()]);
        }
        write!(f, "{table}")
    }
}

/// Label every tracklet and detection with the NEO flag of the object it belongs to.
///
/// Arguments
/// -----------------
/// * `detections`: detections keyed on `detID`.
/// * `tracklets`: tracklets keyed on `trkID`.
/// * `objects`: objects keyed on `objectID`, the only source of labels.
///
/// Return
/// ----------
/// * A [`LabelSet`] with one entry per tracklet and per detection.
///
/// Errors
/// ----------
/// * [`NeoMlError::DanglingReference`] if a tracklet names an unknown object or a detection
///   names an unknown tracklet. Run
///   [`check_referential_integrity`](crate::integrity::check_referential_integrity) first for
///   a complete report.
pub fn generate_labels(
    detections: &Catalog<Detection>,
    tracklets: &Catalog<Tracklet>,
    objects: &Catalog<OrbitalObject>,
) -> Result<LabelSet, NeoMlError> {
    let tracklet_labels = tracklets
        .iter()
        .map(|(trk_id, tracklet)| {
            let object = objects.get(&tracklet.object_id).ok_or_else(|| {
                NeoMlError::DanglingReference {
                    kind: RecordKind::Tracklet,
                    key: trk_id.clone(),
                    target: RecordKind::Object,
                    reference: tracklet.object_id.clone(),
                }
            })?;
            Ok((trk_id.clone(), object.is_neo))
        })
        .collect::<Result<BTreeMap<_, _>, NeoMlError>>()?;

    let detection_labels = detections
        .iter()
        .map(|(det_id, detection)| {
            let label = tracklet_labels.get(&detection.trk_id).copied().ok_or_else(|| {
                NeoMlError::DanglingReference {
                    kind: RecordKind::Detection,
                    key: det_id.clone(),
                    target: RecordKind::Tracklet,
                    reference: detection.trk_id.clone(),
                }
            })?;
            Ok((det_id.clone(), label))
        })
        .collect::<Result<BTreeMap<_, _>, NeoMlError>>()?;

    Ok(LabelSet {
        tracklet_labels,
        detection_labels,
    })
}
