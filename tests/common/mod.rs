#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use neo_ml::{
    mpc_export::pipeline::ReformatConfig,
    records::{detection::Detection, tracklet::Tracklet},
    SampleData,
};

pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The consistent three-file data set: 7 detections, 3 tracklets, 2 objects.
pub fn load_sample_data() -> SampleData {
    SampleData::load(
        &data_path("sample_detections.txt"),
        &data_path("sample_tracklets.txt"),
        &data_path("sample_objects.txt"),
    )
    .unwrap()
}

/// Reformatting of the `raw_data` fixtures into `output_dir`.
pub fn raw_fixture_config(output_dir: Utf8PathBuf, batch_size: usize) -> ReformatConfig {
    ReformatConfig {
        raw_dir: data_path("raw_data"),
        output_dir,
        size: "test".into(),
        obs_codes: data_path("raw_data/ObsCodes.html"),
        batch_size,
    }
}

pub fn assert_detection_close(actual: &Detection, expected: &Detection, epsilon: f64) {
    assert_eq!(actual.det_id, expected.det_id);
    assert_eq!(actual.trk_id, expected.trk_id);
    assert_eq!(actual.obs_code, expected.obs_code);
    assert_eq!(actual.vmag, expected.vmag);
    assert_relative_eq!(actual.time_utc, expected.time_utc, epsilon = epsilon);
    assert_relative_eq!(actual.obs_position, expected.obs_position, epsilon = epsilon);
    assert_relative_eq!(actual.unit_vector, expected.unit_vector, epsilon = epsilon);
    assert_relative_eq!(actual.ecliptic_lat, expected.ecliptic_lat, epsilon = epsilon);
    assert_relative_eq!(actual.solar_elong, expected.solar_elong, epsilon = epsilon);
}

pub fn assert_tracklet_close(actual: &Tracklet, expected: &Tracklet, epsilon: f64) {
    assert_eq!(actual.trk_id, expected.trk_id);
    assert_eq!(actual.object_id, expected.object_id);
    assert_eq!(actual.vec_ang_sepn.len(), expected.vec_ang_sepn.len());
    for (a, e) in actual.vec_ang_sepn.iter().zip(&expected.vec_ang_sepn) {
        assert_relative_eq!(a, e, epsilon = epsilon);
    }
    for (a, e) in actual.vec_ang_rate.iter().zip(&expected.vec_ang_rate) {
        assert_relative_eq!(a, e, max_relative = epsilon);
    }
    assert_eq!(actual.mean_ang_rate.is_some(), expected.mean_ang_rate.is_some());
    assert_eq!(actual.rms, expected.rms);
}
