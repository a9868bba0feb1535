//! # Observer & Site Geometry
//!
//! Heliocentric position of a ground-based observatory at the time of an observation, needed
//! for the `Obs_X/Y/Z` columns and for the solar elongation of every detection.
//!
//! - [`Observer`] stores an MPC site as **geocentric parallax coordinates** (ρ·cosφ, ρ·sinφ)
//!   and an east longitude.
//! - [`ObservatoryEphemeris`] resolves an MPC observatory code and an epoch into a
//!   heliocentric position; [`observatories::Observatories`] implements it from an MPC
//!   `ObsCodes` listing.
//!
//! ## Frames & conventions
//!
//! ```text
//! Body-fixed  --(GMST about z)-->  Equatorial  --(+ Earth heliocentric)-->  Heliocentric equatorial
//!                                                                            \-> Heliocentric ecliptic
//! ```
//!
//! Precession, nutation and polar motion are neglected: the reduction is good to a few
//! Earth radii, well below what the angular rates of a tracklet are sensitive to.
//!
//! ## Units
//!
//! - Longitudes: **degrees** (east positive).
//! - Geocentric parallax (ρ·cosφ, ρ·sinφ): **Earth radii**.
//! - Positions: **AU**.
pub mod earth_position;
pub mod observatories;

use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{Degree, JdUtc, ERAU},
    geometry::equatorial_to_ecliptic,
    neo_ml_errors::NeoMlError,
    time::{gmst, jd_to_mjd},
};

use earth_position::earth_helio_equatorial;

/// Observer geocentric parameters.
///
/// Units
/// -----
/// * `longitude`: degrees (east positive).
/// * `rho_cos_phi`, `rho_sin_phi`: Earth radii (ρ times trig of the geocentric latitude φ).
#[derive(Debug, PartialEq, Clone)]
pub struct Observer {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: Degree,

    /// ρ·cosφ, in **Earth radii**.
    pub rho_cos_phi: f64,

    /// ρ·sinφ, in **Earth radii**.
    pub rho_sin_phi: f64,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl Observer {
    /// Create a new observer from geocentric parallax coordinates.
    pub fn from_parallax(
        longitude: Degree,
        rho_cos_phi: f64,
        rho_sin_phi: f64,
        name: Option<String>,
    ) -> Observer {
        Observer {
            longitude,
            rho_cos_phi,
            rho_sin_phi,
            name,
        }
    }

    /// Get the fixed position of an observatory using its parallax coordinates
    ///
    /// Return
    /// ------
    /// * observer fixed coordinates vector on the Earth (not corrected from Earth motion)
    /// * units is AU
    pub fn body_fixed_coord(&self) -> Vector3<f64> {
        let lon_radians = self.longitude.to_radians();

        Vector3::new(
            ERAU * self.rho_cos_phi * lon_radians.cos(),
            ERAU * self.rho_cos_phi * lon_radians.sin(),
            ERAU * self.rho_sin_phi,
        )
    }

    /// Geocentric position of the observer in the equatorial frame, in **AU**.
    ///
    /// The body-fixed vector is rotated about the polar axis by the Greenwich mean sidereal
    /// time of `jd_utc`.
    pub fn geocentric_position(&self, jd_utc: JdUtc) -> Vector3<f64> {
        let theta = gmst(jd_to_mjd(jd_utc));
        Rotation3::from_axis_angle(&Vector3::z_axis(), theta) * self.body_fixed_coord()
    }

    /// Heliocentric position of the observer in the equatorial J2000 frame, in **AU**.
    pub fn helio_position(&self, jd_utc: JdUtc) -> Vector3<f64> {
        earth_helio_equatorial(jd_utc) + self.geocentric_position(jd_utc)
    }
}

/// Source of heliocentric observatory positions, keyed by MPC observatory code.
pub trait ObservatoryEphemeris {
    /// Heliocentric position of observatory `code` at `jd_utc`, equatorial J2000, **AU**.
    ///
    /// Errors
    /// ----------
    /// * [`NeoMlError::UnknownObservatory`] for a code the source does not know.
    /// * [`NeoMlError::ObservatoryWithoutGeometry`] for a site with no fixed position
    ///   (space-based or roving observers).
    fn helio_equatorial_position(
        &self,
        code: &str,
        jd_utc: JdUtc,
    ) -> Result<Vector3<f64>, NeoMlError>;

    /// Same as [`ObservatoryEphemeris::helio_equatorial_position`], rotated to ecliptic J2000.
    fn helio_ecliptic_position(
        &self,
        code: &str,
        jd_utc: JdUtc,
    ) -> Result<Vector3<f64>, NeoMlError> {
        Ok(equatorial_to_ecliptic(
            &self.helio_equatorial_position(code, jd_utc)?,
        ))
    }
}

#[cfg(test)]
mod observer_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_body_fixed_coord() {
        let greenwich = Observer::from_parallax(0.0, 0.62411, 0.77873, Some("Greenwich".into()));
        let bf = greenwich.body_fixed_coord();
        assert_relative_eq!(bf.x, ERAU * 0.62411);
        assert_relative_eq!(bf.y, 0.0);
        assert_relative_eq!(bf.z, ERAU * 0.77873);
    }

    #[test]
    fn test_geocentric_position_rotates_about_pole() {
        // Pan-STARRS 1, Haleakala
        let f51 = Observer::from_parallax(203.744090, 0.936241, 0.351543, None);
        let jd = 2_456_776.4895;
        let geo = f51.geocentric_position(jd);

        assert_relative_eq!(geo.norm(), f51.body_fixed_coord().norm(), epsilon = 1e-15);
        assert_relative_eq!(geo.z, ERAU * 0.351543, epsilon = 1e-15);

        // Longitude on the sky = site longitude + GMST
        let expected = (203.744090_f64.to_radians() + gmst(jd_to_mjd(jd)))
            .rem_euclid(std::f64::consts::TAU);
        assert_relative_eq!(
            geo.y.atan2(geo.x).rem_euclid(std::f64::consts::TAU),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_helio_position_is_earth_plus_site() {
        let site = Observer::from_parallax(0.0, 0.62411, 0.77873, None);
        let jd = 2_458_849.5;
        let diff = site.helio_position(jd) - earth_helio_equatorial(jd);
        assert_relative_eq!(diff.norm(), site.body_fixed_coord().norm(), epsilon = 1e-15);
    }
}
