//! Tracklet aggregation.
//!
//! Detections of one tracklet are collected as they are read; once the tracklet is complete
//! they are sorted by time and the step-by-step angular motion is derived:
//!
//! ```text
//! sepn[k] = angle(uv[k], uv[k+1])                       (rad)
//! rate[k] = sepn[k] / ((t[k+1] - t[k]) · 86400)         (rad/s)
//! mean    = Σ rate[k] / (n - 1)
//! ```
use nalgebra::Vector3;

use crate::{
    constants::{JdUtc, ObjectId, TrkId, SECONDS_PER_DAY},
    geometry::angle_between_unit_vectors,
    neo_ml_errors::NeoMlError,
    records::{detection::Detection, tracklet::Tracklet},
};

/// Tracklet record from `(time, unit vector)` samples, in any order.
///
/// Errors
/// ----------
/// * [`NeoMlError::InvalidTracklet`] for an empty sample set, or when two samples share the
///   same epoch (duplicate observations would give an infinite rate).
pub fn tracklet_from_samples(
    trk_id: TrkId,
    object_id: ObjectId,
    samples: &[(JdUtc, Vector3<f64>)],
) -> Result<Tracklet, NeoMlError> {
    if samples.is_empty() {
        return Err(NeoMlError::InvalidTracklet {
            trk_id,
            reason: "no detections".into(),
        });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut vec_ang_sepn = Vec::with_capacity(sorted.len() - 1);
    let mut vec_ang_rate = Vec::with_capacity(sorted.len() - 1);
    for pair in sorted.windows(2) {
        let (t1, uv1) = &pair[0];
        let (t2, uv2) = &pair[1];

        let dt = (t2 - t1) * SECONDS_PER_DAY;
        if dt <= 0.0 {
            return Err(NeoMlError::InvalidTracklet {
                trk_id,
                reason: format!("two detections at the same epoch {t1}"),
            });
        }

        let sepn = angle_between_unit_vectors(uv1, uv2);
        vec_ang_sepn.push(sepn);
        vec_ang_rate.push(sepn / dt);
    }

    let mean_ang_rate = (!vec_ang_rate.is_empty())
        .then(|| vec_ang_rate.iter().sum::<f64>() / vec_ang_rate.len() as f64);

    Ok(Tracklet {
        trk_id,
        object_id,
        vec_ang_sepn,
        vec_ang_rate,
        mean_ang_rate,
        rms: None,
    })
}

/// Detections of one tracklet being accumulated.
///
/// A single failing detection rejects the whole tracklet: none of its detections is kept.
#[derive(Debug, Clone)]
pub struct TrackletBuilder {
    trk_id: TrkId,
    object_id: ObjectId,
    detections: Vec<Detection>,
    rejection: Option<String>,
}

impl TrackletBuilder {
    pub fn new(trk_id: TrkId, object_id: ObjectId) -> Self {
        TrackletBuilder {
            trk_id,
            object_id,
            detections: Vec::new(),
            rejection: None,
        }
    }

    pub fn trk_id(&self) -> &str {
        &self.trk_id
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn push(&mut self, detection: Detection) {
        if self.rejection.is_none() {
            self.detections.push(detection);
        }
    }

    /// Flag the tracklet as unusable. The first reason is kept.
    pub fn reject(&mut self, reason: impl Into<String>) {
        if self.rejection.is_none() {
            self.rejection = Some(reason.into());
            self.detections.clear();
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Close the tracklet.
    ///
    /// Return
    /// ----------
    /// * The tracklet record and its detections sorted by time.
    ///
    /// Errors
    /// ----------
    /// * [`NeoMlError::InvalidTracklet`] if the tracklet was rejected, or if its motion cannot
    ///   be computed (see [`tracklet_from_samples`]).
    pub fn finish(mut self) -> Result<(Tracklet, Vec<Detection>), NeoMlError> {
        if let Some(reason) = self.rejection {
            return Err(NeoMlError::InvalidTracklet {
                trk_id: self.trk_id,
                reason,
            });
        }

        self.detections
            .sort_by(|a, b| a.time_utc.total_cmp(&b.time_utc));
        let samples: Vec<(JdUtc, Vector3<f64>)> = self
            .detections
            .iter()
            .map(|d| (d.time_utc, d.unit_vector))
            .collect();

        let tracklet = tracklet_from_samples(self.trk_id, self.object_id, &samples)?;
        Ok((tracklet, self.detections))
    }
}

#[cfg(test)]
mod tracklet_builder_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::radec_to_unit_vector_equatorial;

    fn detection(det_id: &str, time_utc: JdUtc, ra: f64, dec: f64) -> Detection {
        Detection {
            det_id: det_id.into(),
            trk_id: "trk".into(),
            time_utc,
            obs_position: Vector3::new(-0.9, 0.4, 0.0),
            unit_vector: radec_to_unit_vector_equatorial(ra, dec),
            vmag: None,
            obs_code: "F51".into(),
            ecliptic_lat: 0.0,
            solar_elong: 0.0,
        }
    }

    #[test]
    fn test_rates_are_separation_over_seconds() {
        let uv0 = Vector3::x();
        let uv1 = radec_to_unit_vector_equatorial(0.01, 0.0);
        let uv2 = radec_to_unit_vector_equatorial(0.03, 0.0);
        let t0 = 2_458_000.5;

        // Unsorted on purpose.
        let samples = [(t0 + 0.02, uv1), (t0, uv0), (t0 + 0.04, uv2)];
        let trk = tracklet_from_samples("t".into(), "o".into(), &samples).unwrap();

        assert_eq!(trk.vec_ang_sepn.len(), 2);
        assert_relative_eq!(trk.vec_ang_sepn[0], 0.01_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(trk.vec_ang_sepn[1], 0.02_f64.to_radians(), epsilon = 1e-12);

        for (rate, sepn) in trk.vec_ang_rate.iter().zip(&trk.vec_ang_sepn) {
            assert_relative_eq!(*rate, sepn / (0.02 * SECONDS_PER_DAY), max_relative = 1e-6);
        }
        assert_relative_eq!(
            trk.mean_ang_rate.unwrap(),
            (trk.vec_ang_rate[0] + trk.vec_ang_rate[1]) / 2.0
        );
        assert_eq!(trk.rms, None);
    }

    #[test]
    fn test_single_detection_has_no_mean_rate() {
        let trk =
            tracklet_from_samples("t".into(), "o".into(), &[(2_458_000.5, Vector3::z())]).unwrap();
        assert!(trk.vec_ang_sepn.is_empty());
        assert!(trk.vec_ang_rate.is_empty());
        assert_eq!(trk.mean_ang_rate, None);
    }

    #[test]
    fn test_duplicate_epoch_is_rejected() {
        let samples = [(2_458_000.5, Vector3::x()), (2_458_000.5, Vector3::y())];
        assert!(matches!(
            tracklet_from_samples("t".into(), "o".into(), &samples),
            Err(NeoMlError::InvalidTracklet { trk_id, .. }) if trk_id == "t"
        ));
        assert!(tracklet_from_samples("t".into(), "o".into(), &[]).is_err());
    }

    #[test]
    fn test_builder_sorts_detections() {
        let mut builder = TrackletBuilder::new("trk".into(), "K17A00000Z".into());
        builder.push(detection("d2", 2_458_000.52, 10.02, 5.0));
        builder.push(detection("d1", 2_458_000.50, 10.00, 5.0));
        assert_eq!(builder.len(), 2);

        let (trk, dets) = builder.finish().unwrap();
        assert_eq!(trk.object_id, "K17A00000Z");
        assert_eq!(
            dets.iter().map(|d| d.det_id.as_str()).collect::<Vec<_>>(),
            vec!["d1", "d2"]
        );
        assert_eq!(trk.vec_ang_rate.len(), 1);
    }

    #[test]
    fn test_builder_rejection_drops_detections() {
        let mut builder = TrackletBuilder::new("trk".into(), "obj".into());
        builder.push(detection("d1", 2_458_000.50, 10.00, 5.0));
        builder.reject("unknown observatory");
        builder.push(detection("d2", 2_458_000.52, 10.02, 5.0));

        assert!(builder.is_rejected());
        assert!(builder.is_empty());
        assert_eq!(
            builder.finish().unwrap_err(),
            NeoMlError::InvalidTracklet {
                trk_id: "trk".into(),
                reason: "unknown observatory".into()
            }
        );
    }
}
