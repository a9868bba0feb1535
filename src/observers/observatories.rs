//! MPC observatory table.
//!
//! Parses the fixed-width MPC `ObsCodes` listing (plain text or the `<pre>`-wrapped HTML page
//! served by the Minor Planet Center):
//!
//! ```text
//! Code  Long.   cos      sin    Name
//! 000   0.0000 0.62411 +0.77873 Greenwich
//! 250                           Hubble Space Telescope
//! ```
//!
//! Sites without a parallax triplet (space telescopes, roving observers) are kept so the
//! code is still recognised, but they have no fixed geometry.
use std::collections::HashMap;

use camino::Utf8Path;
use log::debug;
use nalgebra::Vector3;

use crate::{
    constants::{JdUtc, MpcCode},
    neo_ml_errors::NeoMlError,
    sample_data::parser::read_file,
};

use super::{Observer, ObservatoryEphemeris};

/// Observatories indexed by their MPC code.
#[derive(Debug, Default, Clone)]
pub struct Observatories {
    sites: HashMap<MpcCode, Option<Observer>>,
}

/// Parse a float from a fixed-width slice, `None` when the slice is missing or blank.
fn parse_column(s: &str, slice: std::ops::Range<usize>) -> Option<f64> {
    s.get(slice)?.trim().parse().ok()
}

/// Extract longitude, ρ·cosφ, ρ·sinφ and name from the tail of an `ObsCodes` row.
///
/// Arguments
/// -----------------
/// * `remain`: fixed-width tail of the line (after the 3-char MPC code).
///
/// Return
/// ----------
/// * The site name and its parallax triplet, `None` when any of the three is missing.
fn parse_remain(remain: &str) -> (String, Option<(f64, f64, f64)>) {
    let name = remain.get(27..).unwrap_or_default().trim().to_string();

    (name, parse_parallax(remain))
}

fn parse_parallax(remain: &str) -> Option<(f64, f64, f64)> {
    Some((
        parse_column(remain, 1..10)?,
        parse_column(remain, 10..18)?,
        parse_column(remain, 18..27)?,
    ))
}

impl Observatories {
    /// Build the table from the content of an `ObsCodes` listing.
    ///
    /// Header, HTML tag and blank lines are skipped.
    pub fn from_obscodes_str(content: &str) -> Observatories {
        let mut sites = HashMap::new();

        for line in content.lines() {
            let line = line.trim_end().trim_start_matches("<pre>");
            if line.is_empty() || line.starts_with('<') || line.starts_with("Code") {
                continue;
            }

            if let Some((code, remain)) = line.split_at_checked(3) {
                let (name, geometry) = parse_remain(remain);
                let observer = geometry.map(|(longitude, cos, sin)| {
                    Observer::from_parallax(longitude, cos, sin, Some(name))
                });
                sites.insert(code.to_string(), observer);
            }
        }

        debug!("Loaded {} observatories", sites.len());
        Observatories { sites }
    }

    /// Read and parse an `ObsCodes` file.
    pub fn from_file(path: &Utf8Path) -> Result<Observatories, NeoMlError> {
        Ok(Observatories::from_obscodes_str(&read_file(path)?))
    }

    /// Look up an observatory.
    ///
    /// Return
    /// ----------
    /// * `None` for an unknown code, `Some(None)` for a known site without fixed geometry.
    pub fn get(&self, code: &str) -> Option<Option<&Observer>> {
        self.sites.get(code).map(Option::as_ref)
    }

    /// Number of known observatory codes.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl ObservatoryEphemeris for Observatories {
    fn helio_equatorial_position(
        &self,
        code: &str,
        jd_utc: JdUtc,
    ) -> Result<Vector3<f64>, NeoMlError> {
        match self.get(code) {
            None => Err(NeoMlError::UnknownObservatory(code.to_string())),
            Some(None) => Err(NeoMlError::ObservatoryWithoutGeometry(code.to_string())),
            Some(Some(observer)) => Ok(observer.helio_position(jd_utc)),
        }
    }
}
