//! # Sky geometry helpers
//!
//! Small vector-algebra routines used to reduce astrometric observations to the quantities
//! stored in the detection and tracklet files.
//!
//! ## Frames
//!
//! * **Equatorial J2000** – x towards the vernal equinox, z towards the celestial north pole.
//! * **Ecliptic J2000** – same x axis, z towards the north ecliptic pole.
//!
//! The two frames differ by a rotation of the mean J2000 obliquity
//! ([`OBLIQUITY_J2000`]) about the common x axis:
//!
//! ```text
//! v_ecl = R_x(-ε) · v_equ        v_equ = R_x(+ε) · v_ecl
//! ```
//!
//! ## Units
//!
//! Inputs in degrees are named `*_deg`; everything else is in **radians** and **AU**.
use std::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Degree, Radian, OBLIQUITY_J2000},
    neo_ml_errors::NeoMlError,
};

/// Fixed rotation from equatorial J2000 to ecliptic J2000.
pub fn rot_equ_to_ecl() -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), -OBLIQUITY_J2000).into()
}

/// Fixed rotation from ecliptic J2000 to equatorial J2000.
pub fn rot_ecl_to_equ() -> Matrix3<f64> {
    rot_equ_to_ecl().transpose()
}

/// Rotate an equatorial J2000 vector into the ecliptic J2000 frame.
pub fn equatorial_to_ecliptic(v: &Vector3<f64>) -> Vector3<f64> {
    rot_equ_to_ecl() * v
}

/// Rotate an ecliptic J2000 vector into the equatorial J2000 frame.
pub fn ecliptic_to_equatorial(v: &Vector3<f64>) -> Vector3<f64> {
    rot_ecl_to_equ() * v
}

/// Unit vector pointing at (RA, Dec), in the equatorial frame.
///
/// Arguments
/// -----------------
/// * `ra_deg`: right ascension in **degrees**.
/// * `dec_deg`: declination in **degrees**.
pub fn radec_to_unit_vector_equatorial(ra_deg: Degree, dec_deg: Degree) -> Vector3<f64> {
    let (ra, dec) = (ra_deg.to_radians(), dec_deg.to_radians());
    Vector3::new(ra.cos() * dec.cos(), ra.sin() * dec.cos(), dec.sin())
}

/// Check that a slice holds exactly one 3-vector and convert it.
pub fn unit_vector_from_slice(values: &[f64]) -> Result<Vector3<f64>, NeoMlError> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(NeoMlError::InvalidVectorShape(values.len())),
    }
}

/// Angle between two unit vectors, `acos(a · b)`.
///
/// Evaluated as `atan2(|a × b|, a · b)`, which equals the arccosine for unit vectors but
/// stays accurate for the arcsecond-scale steps inside a tracklet, and gives exactly `0`
/// for identical vectors and `π` for opposite ones.
pub fn angle_between_unit_vectors(a: &Vector3<f64>, b: &Vector3<f64>) -> Radian {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Angles between one unit vector and each vector of a batch.
pub fn angles_to_unit_vectors(a: &Vector3<f64>, batch: &[Vector3<f64>]) -> Vec<Radian> {
    batch
        .iter()
        .map(|b| angle_between_unit_vectors(a, b))
        .collect()
}

/// Latitude above the ecliptic plane of an ecliptic unit vector.
pub fn ecliptic_latitude(unit_vector: &Vector3<f64>) -> Radian {
    (unit_vector.z / unit_vector.x.hypot(unit_vector.y)).atan()
}

/// Solar elongation of a detection.
///
/// The angle, seen from the observatory, between the Sun and the line of sight.
///
/// Arguments
/// -----------------
/// * `unit_vector`: observatory → object line of sight (unit norm).
/// * `observer_helio_position`: heliocentric observatory position, same frame.
///
/// Return
/// ----------
/// * `π − angle(line of sight, Sun → observatory)` in **radians**, or `None` for an observatory
///   at the origin.
pub fn solar_elongation(
    unit_vector: &Vector3<f64>,
    observer_helio_position: &Vector3<f64>,
) -> Option<Radian> {
    let sun_to_observer = observer_helio_position.try_normalize(0.0)?;
    Some(PI - angle_between_unit_vectors(unit_vector, &sun_to_observer))
}
