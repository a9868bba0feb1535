//! Readers for the raw database exports consumed by the reformatting tool.
//!
//! * Observations: `provid_pkd,obsid,trkid,obs80`, one row per detection, rows of one
//!   tracklet adjacent to each other.
//! * Orbits: `desig_pkd,peri_dist,eccentricity,incl,arg_peri,asc_node,peri_time`, angles in
//!   degrees and perihelion time in JD.
use std::{collections::btree_map::Entry, fs::File};

use camino::Utf8Path;
use serde::Deserialize;

use crate::{
    constants::{Au, Degree, ObjectId},
    neo_ml_errors::NeoMlError,
    records::object::{CometaryElements, OrbitalObject},
    sample_data::ingest::Catalog,
    schema::RecordKind,
};

/// One row of the observation export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawObservation {
    /// Packed provisional designation of the orbit the observation is linked to.
    pub provid_pkd: String,
    pub obsid: String,
    pub trkid: String,
    /// The untouched 80-column observation line.
    pub obs80: String,
}

/// One row of the orbit export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawOrbit {
    pub desig_pkd: ObjectId,
    pub peri_dist: Au,
    pub eccentricity: f64,
    pub incl: Degree,
    pub arg_peri: Degree,
    pub asc_node: Degree,
    pub peri_time: f64,
}

impl RawOrbit {
    /// Orbital object with angles converted to radians and the NEO flag derived from `q`.
    pub fn to_object(&self) -> OrbitalObject {
        OrbitalObject::from_orbit(
            self.desig_pkd.clone(),
            CometaryElements {
                perihelion_distance: self.peri_dist,
                eccentricity: self.eccentricity,
                inclination: self.incl.to_radians(),
                periapsis_argument: self.arg_peri.to_radians(),
                ascending_node_longitude: self.asc_node.to_radians(),
                perihelion_time: self.peri_time,
            },
        )
    }
}

fn open_csv(path: &Utf8Path) -> Result<csv::Reader<File>, NeoMlError> {
    if !path.is_file() {
        return Err(NeoMlError::FileNotFound(path.to_path_buf()));
    }
    Ok(csv::Reader::from_path(path)?)
}

/// Iterate over the rows of an observation export, in file order.
///
/// Each item carries the 1-based line number of the row. Malformed rows come out as
/// [`NeoMlError::CsvError`] items and the iteration goes on.
pub fn read_raw_observations(
    path: &Utf8Path,
) -> Result<impl Iterator<Item = (u64, Result<RawObservation, NeoMlError>)>, NeoMlError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers()?.clone();
    Ok(reader
        .into_records()
        .enumerate()
        .map(move |(idx, record)| {
            let line = record
                .as_ref()
                .ok()
                .and_then(|r| r.position())
                .map_or(idx as u64 + 2, |p| p.line());
            let observation = record
                .and_then(|r| r.deserialize::<RawObservation>(Some(&headers)))
                .map_err(NeoMlError::from);
            (line, observation)
        }))
}

/// Read an orbit export into object records keyed by designation.
///
/// Errors
/// ----------
/// * [`NeoMlError::CsvError`] on a malformed row.
/// * [`NeoMlError::DuplicateKey`] when a designation appears twice.
pub fn read_raw_orbits(path: &Utf8Path) -> Result<Catalog<OrbitalObject>, NeoMlError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers()?.clone();
    let mut lines = Catalog::new();
    let mut objects = Catalog::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let orbit: RawOrbit = record.deserialize(Some(&headers))?;

        match lines.entry(orbit.desig_pkd.clone()) {
            Entry::Occupied(first) => {
                return Err(NeoMlError::DuplicateKey {
                    kind: RecordKind::Object,
                    key: orbit.desig_pkd,
                    line,
                    first_line: *first.get(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(line);
            }
        }
        objects.insert(orbit.desig_pkd.clone(), orbit.to_object());
    }

    log::info!("read {} orbits from {path}", objects.len());
    Ok(objects)
}

#[cfg(test)]
mod raw_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_orbit_to_object() {
        let orbit = RawOrbit {
            desig_pkd: "K17A00000Z".into(),
            peri_dist: 1.860740581,
            eccentricity: 0.327816993,
            incl: 11.9724421,
            arg_peri: 24.3326162,
            asc_node: 353.2247911,
            peri_time: 2459182.9309837,
        };
        let object = orbit.to_object();
        assert_eq!(object.object_id, "K17A00000Z");
        assert!(!object.is_neo);
        assert_eq!(object.object_type, None);
        assert_relative_eq!(object.orbit.inclination, 11.9724421_f64.to_radians());
        assert_relative_eq!(object.orbit.ascending_node_longitude, 6.164, epsilon = 1e-3);
        assert_eq!(object.orbit.perihelion_time, 2459182.9309837);
    }

    #[test]
    fn test_observation_row_keeps_obs80_padding() {
        let data = "provid_pkd,obsid,trkid,obs80\n\
            K17A00000Z,L1UJng000000Crte0100001m7,00000VF-fh,     K17A00Z 5C2014 04 28.98950 13 24 42.05 -19 38 29.3                L~2ClrW84\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<RawObservation> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trkid, "00000VF-fh");
        assert_eq!(rows[0].obs80.len(), 80);
        assert!(rows[0].obs80.starts_with("     K17A00Z"));
    }
}
