use super::{format_bool, format_f64, FieldReader, SampleRecord, NONE_TOKEN};
use crate::{
    constants::{Au, JdUtc, ObjectId, Radian, NEO_PERIHELION_LIMIT},
    neo_ml_errors::NeoMlError,
    sample_data::ingest::RawRecord,
    schema::{Schema, OBJECT_SCHEMA},
};

/// Classify an orbit as Near-Earth Object from its perihelion distance.
///
/// The rule is a strict threshold: `q < 1.3 AU`. An orbit with `q` exactly at the limit
/// is **not** an NEO.
///
/// Arguments
/// -----------------
/// * `perihelion_distance`: perihelion distance `q` in **AU**.
///
/// Return
/// ----------
/// * `true` if the object is an NEO.
pub fn is_neo(perihelion_distance: Au) -> bool {
    perihelion_distance < NEO_PERIHELION_LIMIT
}

/// # Cometary orbital elements
///
/// Perihelion-based elements, as exported by the MPC orbit table.
///
/// Units & conventions
/// --------------------
/// - Distances in **AU**; angles in **radians**; perihelion time as **JD**.
#[derive(Debug, Clone, PartialEq)]
pub struct CometaryElements {
    /// Perihelion distance `q` (AU).
    pub perihelion_distance: Au,

    /// Eccentricity `e`.
    pub eccentricity: f64,

    /// Inclination `i` (rad).
    pub inclination: Radian,

    /// Argument of periapsis `ω` (rad).
    pub periapsis_argument: Radian,

    /// Longitude of the ascending node `Ω` (rad).
    pub ascending_node_longitude: Radian,

    /// Time of perihelion passage (JD).
    pub perihelion_time: JdUtc,
}

impl CometaryElements {
    pub fn is_neo(&self) -> bool {
        is_neo(self.perihelion_distance)
    }
}

/// A known object with its orbit and NEO label.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalObject {
    pub object_id: ObjectId,
    pub is_neo: bool,
    /// Sub-classification of the object; not assigned by any tool of this crate.
    pub object_type: Option<i32>,
    pub orbit: CometaryElements,
}

impl OrbitalObject {
    /// Build an object from its orbit, labelling it with [`is_neo`].
    pub fn from_orbit(object_id: ObjectId, orbit: CometaryElements) -> Self {
        OrbitalObject {
            object_id,
            is_neo: orbit.is_neo(),
            object_type: None,
            orbit,
        }
    }
}

impl SampleRecord for OrbitalObject {
    const SCHEMA: Schema = OBJECT_SCHEMA;

    fn key(&self) -> &str {
        &self.object_id
    }

    fn from_raw(raw: &RawRecord) -> Result<Self, NeoMlError> {
        let r = FieldReader::new(Self::SCHEMA, raw);
        Ok(OrbitalObject {
            object_id: r.string("objectID")?,
            is_neo: r.bool("isNEO")?,
            object_type: r.opt_i32("objectType")?,
            orbit: CometaryElements {
                perihelion_distance: r.f64("orbit_q")?,
                eccentricity: r.f64("orbit_e")?,
                inclination: r.f64("orbit_i")?,
                periapsis_argument: r.f64("orbit_AP")?,
                ascending_node_longitude: r.f64("orbit_LAN")?,
                perihelion_time: r.f64("orbit_TP")?,
            },
        })
    }

    fn field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "objectID" => self.object_id.clone(),
            "isNEO" => format_bool(self.is_neo),
            "objectType" => self
                .object_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| NONE_TOKEN.to_string()),
            "orbit_q" => format_f64(self.orbit.perihelion_distance),
            "orbit_e" => format_f64(self.orbit.eccentricity),
            "orbit_i" => format_f64(self.orbit.inclination),
            "orbit_AP" => format_f64(self.orbit.periapsis_argument),
            "orbit_LAN" => format_f64(self.orbit.ascending_node_longitude),
            "orbit_TP" => format_f64(self.orbit.perihelion_time),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod object_test {
    use super::*;

    fn orbit(q: f64) -> CometaryElements {
        CometaryElements {
            perihelion_distance: q,
            eccentricity: 0.3,
            inclination: 0.2,
            periapsis_argument: 0.4,
            ascending_node_longitude: 6.1,
            perihelion_time: 2459182.9309837,
        }
    }

    #[test]
    fn test_neo_threshold() {
        assert!(is_neo(1.2));
        assert!(!is_neo(1.5));
        assert!(!is_neo(1.3));
        assert!(is_neo(1.3 - 1e-12));
    }

    #[test]
    fn test_from_orbit_labels_object() {
        let neo = OrbitalObject::from_orbit("K17A00013G".into(), orbit(0.9));
        assert!(neo.is_neo);
        assert_eq!(neo.object_type, None);

        let main_belt = OrbitalObject::from_orbit("K17A00001J".into(), orbit(2.1));
        assert!(!main_belt.is_neo);
    }

    #[test]
    fn test_to_line_canonical_order() {
        let obj = OrbitalObject::from_orbit("K17A00000Z".into(), orbit(1.5));
        assert_eq!(
            obj.to_line(),
            "False , K17A00000Z , None , 0.4 , 6.1 , 2459182.9309837 , 0.3 , 0.2 , 1.5"
        );
    }
}
