//! Low-precision heliocentric position of the Earth.
//!
//! Uses the solar coordinates of the *Astronomical Almanac* (section C, "low precision
//! formulas for the Sun"), accurate to about 0.01° between 1950 and 2050. The ecliptic
//! longitude is brought from the mean equinox of date back to J2000 with the general
//! precession in longitude, so the result is expressed in the same ecliptic J2000 frame as
//! the rest of the crate.
use nalgebra::Vector3;

use crate::{
    constants::{JdUtc, JD2000},
    geometry::ecliptic_to_equatorial,
};

/// General precession in longitude, degrees per day.
const PRECESSION_DEG_PER_DAY: f64 = 50.29 / 3600.0 / 365.25;

/// Heliocentric position of the Earth in the **ecliptic J2000** frame, in **AU**.
///
/// Arguments
/// -----------------
/// * `jd`: Julian Date (UTC is fine at this precision).
pub fn earth_helio_ecliptic(jd: JdUtc) -> Vector3<f64> {
    let n = jd - JD2000;

    // Mean longitude and mean anomaly of the Sun (deg)
    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let g = (357.528 + 0.985_600_3 * n).to_radians();

    // Geocentric ecliptic longitude of the Sun, mean equinox of date → J2000
    let lambda = (mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()
        - PRECESSION_DEG_PER_DAY * n)
        .to_radians();

    // Sun-Earth distance (AU)
    let r = 1.000_14 - 0.016_71 * g.cos() - 0.000_14 * (2.0 * g).cos();

    // The Earth is seen from the Sun in the opposite direction.
    -r * Vector3::new(lambda.cos(), lambda.sin(), 0.0)
}

/// Heliocentric position of the Earth in the **equatorial J2000** frame, in **AU**.
pub fn earth_helio_equatorial(jd: JdUtc) -> Vector3<f64> {
    ecliptic_to_equatorial(&earth_helio_ecliptic(jd))
}
