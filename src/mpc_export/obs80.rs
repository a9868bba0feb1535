//! # MPC 80-column optical observations
//!
//! Parser for one optical astrometry line in the MPC 80-column format.
//!
//! ## Field layout (0-based, end-exclusive)
//! -----------------
//! | Columns  | Content                                          |
//! |----------|--------------------------------------------------|
//! | `0..5`   | packed permanent number                          |
//! | `5..12`  | packed provisional designation                   |
//! | `13`     | note 1                                           |
//! | `14`     | note 2 (observation technique)                   |
//! | `15..32` | date `YYYY MM DD.ddddd` (UTC)                    |
//! | `32..44` | right ascension `HH MM SS.ss`                    |
//! | `44..56` | declination `±DD MM SS.s`                        |
//! | `65..70` | magnitude (optional)                             |
//! | `70`     | band (optional)                                  |
//! | `77..80` | MPC observatory code                             |
//!
//! Radar, roving-observer and satellite lines (note 2 in `RrVvSs`) carry their extra data on
//! a second line and are rejected.
use std::ops::Range;

use thiserror::Error;

use crate::{
    constants::{Degree, JdUtc, MpcCode},
    conversion::{parse_dec_to_deg, parse_ra_to_deg},
    time::frac_date_to_jd,
};

/// Line-level parsing errors for MPC 80-column observations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseObsError {
    #[error("The line is too short")]
    TooShortLine,
    #[error("The line is not an optical observation (note 2 = {0:?})")]
    NotOpticalObs(char),
    #[error("Error parsing RA: {0}")]
    InvalidRA(String),
    #[error("Invalid Dec value: {0}")]
    InvalidDec(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),
}

/// Note-2 codes of observations spread over two lines.
const TWO_LINE_NOTES: [char; 6] = ['R', 'r', 'V', 'v', 'S', 's'];

/// One optical observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Obs80 {
    /// Packed permanent number, empty for unnumbered objects.
    pub number: String,
    /// Packed provisional designation, empty for numbered objects.
    pub provisional: String,
    pub note2: char,
    pub jd_utc: JdUtc,
    pub ra: Degree,
    pub dec: Degree,
    pub mag: Option<f64>,
    pub band: Option<char>,
    pub obs_code: MpcCode,
}

fn column(line: &str, range: Range<usize>) -> Result<&str, ParseObsError> {
    line.get(range).ok_or(ParseObsError::TooShortLine)
}

impl Obs80 {
    /// Parse a single 80-column line.
    ///
    /// Arguments
    /// -----------------
    /// * `line`: the observation line; trailing line terminators are ignored.
    ///
    /// Return
    /// ----------
    /// * The parsed observation, RA and Dec in **degrees**, time in JD UTC.
    ///
    /// Errors
    /// ----------
    /// * [`ParseObsError::TooShortLine`] below 80 columns.
    /// * [`ParseObsError::NotOpticalObs`] for radar, roving and satellite lines.
    /// * `InvalidDate` / `InvalidRA` / `InvalidDec` / `InvalidMagnitude` with the offending text.
    pub fn parse(line: &str) -> Result<Obs80, ParseObsError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() < 80 {
            return Err(ParseObsError::TooShortLine);
        }

        let note2 = column(line, 14..15)?.chars().next().unwrap_or(' ');
        if TWO_LINE_NOTES.contains(&note2) {
            return Err(ParseObsError::NotOpticalObs(note2));
        }

        let date = column(line, 15..32)?.trim();
        let jd_utc = frac_date_to_jd(date).map_err(|_| ParseObsError::InvalidDate(date.into()))?;

        let ra = column(line, 32..44)?.trim();
        let ra_deg = parse_ra_to_deg(ra).ok_or_else(|| ParseObsError::InvalidRA(ra.into()))?;

        let dec = column(line, 44..56)?.trim();
        let dec_deg = parse_dec_to_deg(dec).ok_or_else(|| ParseObsError::InvalidDec(dec.into()))?;

        let mag = column(line, 65..70)?.trim();
        let mag = if mag.is_empty() {
            None
        } else {
            Some(
                mag.parse()
                    .map_err(|_| ParseObsError::InvalidMagnitude(mag.into()))?,
            )
        };

        let band = column(line, 70..71)?
            .chars()
            .next()
            .filter(|c| !c.is_whitespace());

        Ok(Obs80 {
            number: column(line, 0..5)?.trim().to_string(),
            provisional: column(line, 5..12)?.trim().to_string(),
            note2,
            jd_utc,
            ra: ra_deg,
            dec: dec_deg,
            mag,
            band,
            obs_code: column(line, 77..80)?.trim().to_string(),
        })
    }
}

impl std::str::FromStr for Obs80 {
    type Err = ParseObsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Obs80::parse(s)
    }
}

#[cfg(test)]
mod obs80_test {
    use approx::assert_relative_eq;

    use super::*;

    const LINE: &str =
        "     K17A00Z 5C2014 04 28.98950 13 24 42.05 -19 38 29.3                L~2ClrW84";

    #[test]
    fn test_parse_optical_line() {
        let obs = Obs80::parse(LINE).unwrap();
        assert_eq!(obs.number, "");
        assert_eq!(obs.provisional, "K17A00Z");
        assert_eq!(obs.note2, 'C');
        assert_relative_eq!(obs.jd_utc, 2456776.4895, epsilon = 1e-9);
        assert_relative_eq!(obs.ra, (13.0 + 24.0 / 60.0 + 42.05 / 3600.0) * 15.0);
        assert_relative_eq!(obs.dec, -(19.0 + 38.0 / 60.0 + 29.3 / 3600.0));
        assert_eq!(obs.mag, None);
        assert_eq!(obs.band, None);
        assert_eq!(obs.obs_code, "W84");
    }

    #[test]
    fn test_parse_magnitude() {
        let mut line = LINE.to_string();
        line.replace_range(65..71, "21.4 V");
        let obs: Obs80 = line.parse().unwrap();
        assert_eq!(obs.mag, Some(21.4));
        assert_eq!(obs.band, Some('V'));

        line.replace_range(65..70, "21.x ");
        assert_eq!(
            Obs80::parse(&line),
            Err(ParseObsError::InvalidMagnitude("21.x".into()))
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Obs80::parse(&LINE[..60]), Err(ParseObsError::TooShortLine));

        let mut radar = LINE.to_string();
        radar.replace_range(14..15, "R");
        assert_eq!(
            Obs80::parse(&radar),
            Err(ParseObsError::NotOpticalObs('R'))
        );

        let mut satellite = LINE.to_string();
        satellite.replace_range(14..15, "S");
        assert_eq!(
            Obs80::parse(&satellite),
            Err(ParseObsError::NotOpticalObs('S'))
        );

        let mut bad_ra = LINE.to_string();
        bad_ra.replace_range(32..44, "13 xx 42.05 ");
        assert_eq!(
            Obs80::parse(&bad_ra),
            Err(ParseObsError::InvalidRA("13 xx 42.05".into()))
        );

        let mut bad_date = LINE.to_string();
        bad_date.replace_range(15..32, "2014 13 28.98950 ");
        assert_eq!(
            Obs80::parse(&bad_date),
            Err(ParseObsError::InvalidDate("2014 13 28.98950".into()))
        );
    }
}
