use nalgebra::Vector3;

use super::{format_f64, format_opt_f64, FieldReader, SampleRecord};
use crate::{
    constants::{DetId, JdUtc, MpcCode, Radian, TrkId},
    neo_ml_errors::NeoMlError,
    sample_data::ingest::RawRecord,
    schema::{Schema, DETECTION_SCHEMA},
};

/// A single observation of one object, already reduced to ecliptic geometry.
///
/// Frames & units
/// -----------------
/// * `obs_position` – heliocentric observatory position, ecliptic J2000, **AU**.
/// * `unit_vector` – observatory → object line of sight, ecliptic J2000, unit norm.
/// * `ecliptic_lat`, `solar_elong` – **radians**.
/// * `time_utc` – Julian Date, UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub det_id: DetId,
    pub trk_id: TrkId,
    pub time_utc: JdUtc,
    pub obs_position: Vector3<f64>,
    pub unit_vector: Vector3<f64>,
    /// V-band magnitude, absent when the observation did not report one.
    pub vmag: Option<f64>,
    pub obs_code: MpcCode,
    pub ecliptic_lat: Radian,
    pub solar_elong: Radian,
}

impl SampleRecord for Detection {
    const SCHEMA: Schema = DETECTION_SCHEMA;

    fn key(&self) -> &str {
        &self.det_id
    }

    fn from_raw(raw: &RawRecord) -> Result<Self, NeoMlError> {
        let r = FieldReader::new(Self::SCHEMA, raw);
        Ok(Detection {
            det_id: r.string("detID")?,
            trk_id: r.string("trkID")?,
            time_utc: r.f64("timeUTC")?,
            obs_position: Vector3::new(r.f64("Obs_X")?, r.f64("Obs_Y")?, r.f64("Obs_Z")?),
            unit_vector: Vector3::new(r.f64("UV_X")?, r.f64("UV_Y")?, r.f64("UV_Z")?),
            vmag: r.opt_f64("Vmag")?,
            obs_code: r.string("obsCode")?,
            ecliptic_lat: r.f64("eclipticLat")?,
            solar_elong: r.f64("solarElong")?,
        })
    }

    fn field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "detID" => self.det_id.clone(),
            "trkID" => self.trk_id.clone(),
            "timeUTC" => format_f64(self.time_utc),
            "Obs_X" => format_f64(self.obs_position.x),
            "Obs_Y" => format_f64(self.obs_position.y),
            "Obs_Z" => format_f64(self.obs_position.z),
            "UV_X" => format_f64(self.unit_vector.x),
            "UV_Y" => format_f64(self.unit_vector.y),
            "UV_Z" => format_f64(self.unit_vector.z),
            "Vmag" => format_opt_f64(self.vmag),
            "obsCode" => self.obs_code.clone(),
            "eclipticLat" => format_f64(self.ecliptic_lat),
            "solarElong" => format_f64(self.solar_elong),
            _ => return None,
        };
        Some(value)
    }
}
