//! # Sample-data creation
//!
//! Reformats the raw MPC exports into the three sample files.
//!
//! ## Stages
//! -----------------
//! 1. **Orbits** – the whole orbit export is read into memory ([`read_raw_orbits`]).
//! 2. **Observations** – rows are streamed in file order. Each row is
//!    * skipped if it is malformed, if its obs80 line is not a usable optical observation,
//!      if its orbit is unknown, if its `obsid` was already seen, or if its tracklet was
//!      already written by an earlier batch;
//!    * otherwise reduced to a [`Detection`] and added to the [`TrackletBuilder`] of its
//!      `trkid`. A reduction failure (unknown observatory, site without geometry) rejects the
//!      whole tracklet.
//! 3. **Batches** – every `batch_size` new tracklet ids, the pending tracklets are closed and
//!    their detections and tracklet records appended to the output files. Rows of a tracklet
//!    still pending join it even when they are not adjacent.
//! 4. **Objects** – after the last batch, the objects having at least one accepted tracklet
//!    are written.
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use camino::Utf8PathBuf;
use comfy_table::{presets::UTF8_FULL, Table};
use log::{debug, info, warn};

use super::{
    obs80::Obs80,
    raw::{read_raw_observations, read_raw_orbits, RawObservation},
    tracklet_builder::TrackletBuilder,
};
use crate::{
    constants::{DetId, TrkId},
    geometry::{
        ecliptic_latitude, equatorial_to_ecliptic, radec_to_unit_vector_equatorial,
        solar_elongation,
    },
    neo_ml_errors::NeoMlError,
    observers::{observatories::Observatories, ObservatoryEphemeris},
    records::{detection::Detection, object::OrbitalObject, tracklet::Tracklet},
    sample_data::writer::{write_sample_file, SampleFileWriter},
    schema::{DETECTION_SCHEMA, TRACKLET_SCHEMA},
};

/// Inputs, outputs and batching of one reformatting run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReformatConfig {
    /// Directory holding the raw exports.
    pub raw_dir: Utf8PathBuf,
    /// Directory receiving the sample files.
    pub output_dir: Utf8PathBuf,
    /// Size tag of the observation export, e.g. `1e5`.
    pub size: String,
    /// MPC `ObsCodes` listing.
    pub obs_codes: Utf8PathBuf,
    /// Number of tracklets per output batch, at least 1.
    pub batch_size: usize,
}

impl Default for ReformatConfig {
    fn default() -> Self {
        ReformatConfig {
            raw_dir: "raw_data".into(),
            output_dir: "sample_data".into(),
            size: "1e5".into(),
            obs_codes: "raw_data/ObsCodes.html".into(),
            batch_size: 100,
        }
    }
}

impl ReformatConfig {
    pub fn orbit_path(&self) -> Utf8PathBuf {
        self.raw_dir.join("sample_orbit_large.csv")
    }

    pub fn observation_path(&self) -> Utf8PathBuf {
        self.raw_dir
            .join(format!("sample_obs_{}_sorted.csv", self.size))
    }

    fn output_path(&self, kind: &str) -> Utf8PathBuf {
        self.output_dir
            .join(format!("sample_data_{}_real_{kind}.csv", self.size))
    }

    pub fn detection_output(&self) -> Utf8PathBuf {
        self.output_path("detections")
    }

    pub fn tracklet_output(&self) -> Utf8PathBuf {
        self.output_path("tracklets")
    }

    pub fn object_output(&self) -> Utf8PathBuf {
        self.output_path("objects")
    }
}

/// Counters of one reformatting run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReformatSummary {
    pub lines_read: usize,
    /// Malformed rows and unusable obs80 lines.
    pub lines_skipped: usize,
    /// Rows whose orbit is not in the orbit export.
    pub unknown_orbit: usize,
    /// Rows repeating an `obsid` seen earlier in the export.
    pub duplicate_det_ids: usize,
    pub detections_written: usize,
    pub tracklets_written: usize,
    pub tracklets_rejected: usize,
    pub objects_written: usize,
}

impl fmt::Display for ReformatSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Stage", "Count"]);
        for (stage, count) in [
            ("observation lines read", self.lines_read),
            ("lines skipped", self.lines_skipped),
            ("lines with unknown orbit", self.unknown_orbit),
            ("duplicate detection ids", self.duplicate_det_ids),
            ("detections written", self.detections_written),
            ("tracklets written", self.tracklets_written),
            ("tracklets rejected", self.tracklets_rejected),
            ("objects written", self.objects_written),
        ] {
            table.add_row(vec![stage.to_string(), count.to_string()]);
        }
        write!(f, "{table}")
    }
}

/// Reduce one optical observation to a detection in ecliptic J2000.
///
/// Arguments
/// -----------------
/// * `raw`: the export row, providing `detID` (`obsid`) and `trkID` (`trkid`).
/// * `obs`: its parsed obs80 line.
/// * `ephemeris`: source of heliocentric observatory positions.
///
/// Errors
/// ----------
/// * [`NeoMlError::UnknownObservatory`] / [`NeoMlError::ObservatoryWithoutGeometry`] when
///   the observatory cannot be placed.
pub fn reduce_observation<E: ObservatoryEphemeris + ?Sized>(
    raw: &RawObservation,
    obs: &Obs80,
    ephemeris: &E,
) -> Result<Detection, NeoMlError> {
    let unit_vector = equatorial_to_ecliptic(&radec_to_unit_vector_equatorial(obs.ra, obs.dec));
    let obs_position = ephemeris.helio_ecliptic_position(&obs.obs_code, obs.jd_utc)?;
    let solar_elong = solar_elongation(&unit_vector, &obs_position)
        .ok_or_else(|| NeoMlError::ObservatoryWithoutGeometry(obs.obs_code.clone()))?;

    Ok(Detection {
        det_id: raw.obsid.clone(),
        trk_id: raw.trkid.clone(),
        time_utc: obs.jd_utc,
        obs_position,
        unit_vector,
        vmag: obs.mag,
        obs_code: obs.obs_code.clone(),
        ecliptic_lat: ecliptic_latitude(&unit_vector),
        solar_elong,
    })
}

/// Tracklets of the current batch, in order of first appearance.
#[derive(Debug, Default)]
struct Batch {
    builders: Vec<TrackletBuilder>,
    index: HashMap<TrkId, usize>,
}

impl Batch {
    fn builder(&mut self, trk_id: &str, object_id: &str) -> &mut TrackletBuilder {
        let idx = match self.index.get(trk_id) {
            Some(idx) => *idx,
            None => {
                self.builders
                    .push(TrackletBuilder::new(trk_id.to_string(), object_id.to_string()));
                self.index.insert(trk_id.to_string(), self.builders.len() - 1);
                self.builders.len() - 1
            }
        };
        &mut self.builders[idx]
    }

    fn contains(&self, trk_id: &str) -> bool {
        self.index.contains_key(trk_id)
    }

    fn take(&mut self) -> Vec<TrackletBuilder> {
        self.index.clear();
        std::mem::take(&mut self.builders)
    }
}

/// Reformatting run over an observatory ephemeris.
pub struct SampleDataCreation<'a, E: ObservatoryEphemeris + ?Sized> {
    config: &'a ReformatConfig,
    ephemeris: &'a E,
}

/// Open output files and run-wide bookkeeping.
struct Outputs {
    detections: SampleFileWriter,
    tracklets: SampleFileWriter,
    flushed: HashSet<TrkId>,
    det_ids: HashSet<DetId>,
    accepted_objects: BTreeSet<String>,
}

impl<'a, E: ObservatoryEphemeris + ?Sized> SampleDataCreation<'a, E> {
    pub fn new(config: &'a ReformatConfig, ephemeris: &'a E) -> Self {
        SampleDataCreation { config, ephemeris }
    }

    /// Run all stages and return the run counters.
    pub fn run(&self) -> Result<ReformatSummary, NeoMlError> {
        let config = self.config;
        let batch_size = config.batch_size.max(1);

        info!("--- ORBITS ---");
        let objects = read_raw_orbits(&config.orbit_path())?;

        info!("--- DETECTIONS & TRACKLETS ---");
        let mut outputs = Outputs {
            detections: SampleFileWriter::create(&config.detection_output(), DETECTION_SCHEMA)?,
            tracklets: SampleFileWriter::create(&config.tracklet_output(), TRACKLET_SCHEMA)?,
            flushed: HashSet::new(),
            det_ids: HashSet::new(),
            accepted_objects: BTreeSet::new(),
        };
        info!("created {}", outputs.detections.path());
        info!("created {}", outputs.tracklets.path());

        let mut summary = ReformatSummary::default();
        let mut batch = Batch::default();
        let mut new_tracklets = 0usize;

        for (line, row) in read_raw_observations(&config.observation_path())? {
            summary.lines_read += 1;

            let (raw, obs) = match row.and_then(|raw| {
                let obs = Obs80::parse(&raw.obs80)?;
                Ok((raw, obs))
            }) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!("line {line}: skipped ({err})");
                    summary.lines_skipped += 1;
                    continue;
                }
            };

            if !objects.contains_key(&raw.provid_pkd) {
                summary.unknown_orbit += 1;
                continue;
            }

            if outputs.flushed.contains(&raw.trkid) {
                warn!(
                    "line {line}: tracklet {} already written by an earlier batch, row skipped",
                    raw.trkid
                );
                summary.lines_skipped += 1;
                continue;
            }

            if !outputs.det_ids.insert(raw.obsid.clone()) {
                warn!("line {line}: detection {} already seen, row skipped", raw.obsid);
                summary.duplicate_det_ids += 1;
                continue;
            }

            // A tracklet of the pending batch is never flushed before its later rows.
            if !batch.contains(&raw.trkid) {
                new_tracklets += 1;
                if new_tracklets % batch_size == 0 {
                    info!("line {line}: {new_tracklets} tracklets seen, writing batch");
                    self.flush(batch.take(), &mut outputs, &mut summary)?;
                }
            }

            let builder = batch.builder(&raw.trkid, &raw.provid_pkd);
            match reduce_observation(&raw, &obs, self.ephemeris) {
                Ok(detection) => builder.push(detection),
                Err(err) => builder.reject(err.to_string()),
            }
        }
        self.flush(batch.take(), &mut outputs, &mut summary)?;

        info!("--- TRIMMING ORBITS ---");
        let kept: Vec<&OrbitalObject> = objects
            .iter()
            .filter(|(id, _)| outputs.accepted_objects.contains(*id))
            .map(|(_, object)| object)
            .collect();
        summary.objects_written = write_sample_file(&config.object_output(), kept)?;

        info!(
            "reformatting done: {} detections, {} tracklets ({} rejected), {} objects",
            summary.detections_written,
            summary.tracklets_written,
            summary.tracklets_rejected,
            summary.objects_written
        );
        Ok(summary)
    }

    /// Close the pending tracklets and append the accepted ones to the output files.
    fn flush(
        &self,
        builders: Vec<TrackletBuilder>,
        outputs: &mut Outputs,
        summary: &mut ReformatSummary,
    ) -> Result<(), NeoMlError> {
        let mut tracklets: Vec<Tracklet> = Vec::with_capacity(builders.len());
        let mut detections: Vec<Detection> = Vec::new();

        for builder in builders {
            outputs.flushed.insert(builder.trk_id().to_string());
            match builder.finish() {
                Ok((tracklet, dets)) => {
                    outputs.accepted_objects.insert(tracklet.object_id.clone());
                    tracklets.push(tracklet);
                    detections.extend(dets);
                }
                Err(err) => {
                    warn!("{err}");
                    summary.tracklets_rejected += 1;
                }
            }
        }

        summary.detections_written += outputs.detections.append(&detections)?;
        summary.tracklets_written += outputs.tracklets.append(&tracklets)?;
        info!("appended to {}", outputs.detections.path());
        info!("appended to {}", outputs.tracklets.path());
        Ok(())
    }
}

/// Load the observatory table named by `config` and run the reformatting.
pub fn run_reformat(config: &ReformatConfig) -> Result<ReformatSummary, NeoMlError> {
    let observatories = Observatories::from_file(&config.obs_codes)?;
    SampleDataCreation::new(config, &observatories).run()
}

/// Paths written by a run of `config`, in detection / tracklet / object order.
pub fn output_paths(config: &ReformatConfig) -> [Utf8PathBuf; 3] {
    [
        config.detection_output(),
        config.tracklet_output(),
        config.object_output(),
    ]
}

#[cfg(test)]
mod pipeline_test {
    use nalgebra::Vector3;

    use super::*;
    use crate::constants::JdUtc;

    struct FixedSite;

    impl ObservatoryEphemeris for FixedSite {
        fn helio_equatorial_position(
            &self,
            code: &str,
            _jd_utc: JdUtc,
        ) -> Result<Vector3<f64>, NeoMlError> {
            match code {
                "W84" => Ok(Vector3::new(1.0, 0.0, 0.0)),
                _ => Err(NeoMlError::UnknownObservatory(code.to_string())),
            }
        }
    }

    fn row(trkid: &str) -> RawObservation {
        RawObservation {
            provid_pkd: "K17A00000Z".into(),
            obsid: "L1UJng000000Crte0100001m7".into(),
            trkid: trkid.into(),
            obs80: "     K17A00Z 5C2014 04 28.98950 13 24 42.05 -19 38 29.3                L~2ClrW84"
                .into(),
        }
    }

    #[test]
    fn test_reduce_observation() {
        let raw = row("00000VF-fh");
        let obs = Obs80::parse(&raw.obs80).unwrap();
        let det = reduce_observation(&raw, &obs, &FixedSite).unwrap();

        assert_eq!(det.det_id, "L1UJng000000Crte0100001m7");
        assert_eq!(det.trk_id, "00000VF-fh");
        assert_eq!(det.obs_code, "W84");
        assert_eq!(det.vmag, None);
        approx::assert_relative_eq!(det.unit_vector.norm(), 1.0, epsilon = 1e-14);
        approx::assert_relative_eq!(det.obs_position, Vector3::x(), epsilon = 1e-15);
        approx::assert_relative_eq!(
            det.ecliptic_lat,
            det.unit_vector.z.asin(),
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(
            det.solar_elong,
            std::f64::consts::PI - det.unit_vector.x.acos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_reduce_unknown_observatory() {
        let raw = row("t");
        let mut obs = Obs80::parse(&raw.obs80).unwrap();
        obs.obs_code = "XXX".into();
        assert_eq!(
            reduce_observation(&raw, &obs, &FixedSite),
            Err(NeoMlError::UnknownObservatory("XXX".into()))
        );
    }

    #[test]
    fn test_config_paths() {
        let config = ReformatConfig::default();
        assert_eq!(config.orbit_path(), "raw_data/sample_orbit_large.csv");
        assert_eq!(config.observation_path(), "raw_data/sample_obs_1e5_sorted.csv");
        assert_eq!(
            output_paths(&config),
            [
                Utf8PathBuf::from("sample_data/sample_data_1e5_real_detections.csv"),
                Utf8PathBuf::from("sample_data/sample_data_1e5_real_tracklets.csv"),
                Utf8PathBuf::from("sample_data/sample_data_1e5_real_objects.csv"),
            ]
        );
    }

    #[test]
    fn test_batch_keeps_first_appearance_order() {
        let mut batch = Batch::default();
        batch.builder("b", "o");
        batch.builder("a", "o");
        batch.builder("b", "o");
        assert!(batch.contains("a"));
        assert!(!batch.contains("c"));
        let builders = batch.take();
        assert_eq!(
            builders.iter().map(|b| b.trk_id()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert!(batch.take().is_empty());
        assert!(!batch.contains("a"));
    }
}
