mod common;

use neo_ml::{
    integrity::{check_referential_integrity, IntegrityReport},
    labels::generate_labels,
    records::object::is_neo,
    schema::RecordKind,
    NeoMlError, SampleData,
};

use common::{data_path, load_sample_data};

fn load_broken_data() -> SampleData {
    SampleData::load(
        &data_path("broken_detections.txt"),
        &data_path("broken_tracklets.txt"),
        &data_path("broken_objects.txt"),
    )
    .unwrap()
}

#[test]
fn test_sample_data_is_closed() {
    let data = load_sample_data();
    let report = data.integrity_report();
    assert!(report.is_closed());
    assert_eq!(report.problem_count(), 0);
    assert_eq!(report.to_string(), "Referential integrity: all links resolved");
    assert_eq!(report.into_result(), Ok(()));
}

#[test]
fn test_violations_in_both_directions() {
    let data = load_broken_data();
    let report = check_referential_integrity(&data.detections, &data.tracklets, &data.objects);

    assert_eq!(
        report,
        IntegrityReport {
            unknown_tracklets: vec!["trkX".into()],
            tracklets_without_detections: vec!["trk4".into()],
            unknown_objects: vec!["K99Z00000A".into()],
            objects_without_tracklets: vec!["K20Q00000B".into()],
        }
    );
    assert_eq!(report.problem_count(), 4);

    let rendered = report.to_string();
    assert!(rendered.starts_with("Referential integrity: 4 unmatched key(s)"));
    for key in ["trkX", "trk4", "K99Z00000A", "K20Q00000B"] {
        assert!(rendered.contains(key), "{key} missing from\n{rendered}");
    }

    assert_eq!(
        report.clone().into_result(),
        Err(NeoMlError::ReferentialIntegrity(report))
    );
}

#[test]
fn test_single_direction_violation() {
    // Sample tracklets and objects with an extra orphan object only.
    let mut data = load_sample_data();
    let mut orphan = data.objects["K17A00000Z"].clone();
    orphan.object_id = "K20Q00000B".into();
    data.objects.insert(orphan.object_id.clone(), orphan);

    let report = data.integrity_report();
    assert!(report.unknown_tracklets.is_empty());
    assert!(report.tracklets_without_detections.is_empty());
    assert!(report.unknown_objects.is_empty());
    assert_eq!(report.objects_without_tracklets, vec!["K20Q00000B".to_string()]);

    // Labels only follow references, so the orphan does not prevent labelling.
    assert!(data.labels().is_ok());
}

#[test]
fn test_detection_label_is_object_label() {
    let data = load_sample_data();
    let labels = data.labels().unwrap();

    assert_eq!(labels.detection_labels.len(), data.detections.len());
    assert_eq!(labels.tracklet_labels.len(), data.tracklets.len());

    for (det_id, detection) in &data.detections {
        let tracklet = &data.tracklets[&detection.trk_id];
        let object = &data.objects[&tracklet.object_id];
        assert_eq!(labels.detection_label(det_id), Some(object.is_neo));
        assert_eq!(labels.tracklet_label(&tracklet.trk_id), Some(object.is_neo));
        assert_eq!(object.is_neo, is_neo(object.orbit.perihelion_distance));
    }

    assert_eq!(labels.neo_count(), (5, 2));
    assert_eq!(labels.non_neo_count(), (2, 1));
    assert_eq!(
        labels.tracklet_label_array(),
        vec![true, true, false] // trk1, trk2, trk3
    );
    assert_eq!(labels.detection_label_array().len(), 7);
    assert_eq!(labels.detection_label("det06"), Some(false));
    assert_eq!(labels.detection_label("unknown"), None);

    let rendered = labels.to_string();
    for id in data.detections.keys().chain(data.tracklets.keys()) {
        assert!(rendered.contains(id.as_str()), "{id} missing from\n{rendered}");
    }
}

#[test]
fn test_labelling_does_not_modify_inputs() {
    let data = load_sample_data();
    let before = data.clone();
    let _ = generate_labels(&data.detections, &data.tracklets, &data.objects).unwrap();
    assert_eq!(data, before);
}

#[test]
fn test_dangling_links_fail_labelling() {
    let broken = load_broken_data();
    assert_eq!(
        broken.labels(),
        Err(NeoMlError::DanglingReference {
            kind: RecordKind::Tracklet,
            key: "trk4".into(),
            target: RecordKind::Object,
            reference: "K99Z00000A".into(),
        })
    );

    let sample = load_sample_data();
    assert_eq!(
        generate_labels(&broken.detections, &sample.tracklets, &sample.objects),
        Err(NeoMlError::DanglingReference {
            kind: RecordKind::Detection,
            key: "det99".into(),
            target: RecordKind::Tracklet,
            reference: "trkX".into(),
        })
    );
}

#[test]
fn test_neo_threshold() {
    assert!(is_neo(1.2));
    assert!(!is_neo(1.5));
    assert!(!is_neo(1.3));
}
