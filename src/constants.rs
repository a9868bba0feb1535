//! # Constants and type definitions for neo-ml
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `neo_ml` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, arcseconds ↔ radians)
//! - The NEO classification threshold
//! - Core type aliases used across the crate (identifiers, angles, epochs)

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// JD epoch of J2000.0
pub const JD2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 1976), in arcseconds
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.448;

/// Mean obliquity of the ecliptic at J2000.0, in radians
pub const OBLIQUITY_J2000: Radian = OBLIQUITY_J2000_ARCSEC * RADSEC;

/// Perihelion distance (AU) below which an object is labelled as a Near-Earth Object.
///
/// The comparison is strict: an object with `q == 1.3` is **not** an NEO.
pub const NEO_PERIHELION_LIMIT: f64 = 1.3;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type Au = f64;
/// Julian Date, UTC time scale (days)
pub type JdUtc = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// MPC code identifying an observatory (3 characters)
pub type MpcCode = String;

/// Unique detection identifier (`detID`)
pub type DetId = String;
/// Unique tracklet identifier (`trkID`)
pub type TrkId = String;
/// Unique object identifier (`objectID`)
pub type ObjectId = String;
