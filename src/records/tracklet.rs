use super::{format_f64_list, format_opt_f64, FieldReader, SampleRecord};
use crate::{
    constants::{ObjectId, Radian, TrkId},
    neo_ml_errors::NeoMlError,
    sample_data::ingest::RawRecord,
    schema::{Schema, TRACKLET_SCHEMA},
};

/// Motion summary of a short sequence of detections of one object.
///
/// `vec_ang_sepn[k]` and `vec_ang_rate[k]` describe the step between the time-sorted
/// detections `k` and `k + 1`, so both vectors hold `n - 1` values for `n` detections.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracklet {
    pub trk_id: TrkId,
    pub object_id: ObjectId,
    /// Angular separations between adjacent detections (rad).
    pub vec_ang_sepn: Vec<Radian>,
    /// Angular rates between adjacent detections (rad/s).
    pub vec_ang_rate: Vec<f64>,
    /// Mean of `vec_ang_rate`; `None` when the tracklet has a single detection.
    pub mean_ang_rate: Option<f64>,
    /// RMS deviation from a best-fit great circle. Never computed, always `None` in generated data.
    pub rms: Option<f64>,
}

impl SampleRecord for Tracklet {
    const SCHEMA: Schema = TRACKLET_SCHEMA;

    fn key(&self) -> &str {
        &self.trk_id
    }

    fn from_raw(raw: &RawRecord) -> Result<Self, NeoMlError> {
        let r = FieldReader::new(Self::SCHEMA, raw);
        Ok(Tracklet {
            trk_id: r.string("trkID")?,
            object_id: r.string("objectID")?,
            vec_ang_sepn: r.f64_list("vecAngSepn")?,
            vec_ang_rate: r.f64_list("vecAngRate")?,
            mean_ang_rate: r.opt_f64("meanAngRate")?,
            rms: r.opt_f64("rms")?,
        })
    }

    fn field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "trkID" => self.trk_id.clone(),
            "objectID" => self.object_id.clone(),
            "vecAngSepn" => format_f64_list(&self.vec_ang_sepn),
            "vecAngRate" => format_f64_list(&self.vec_ang_rate),
            "meanAngRate" => format_opt_f64(self.mean_ang_rate),
            "rms" => format_opt_f64(self.rms),
            _ => return None,
        };
        Some(value)
    }
}
