use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::{JdUtc, DPI, JDTOMJD, MJD, T2000};

/// Transformation from Julian Date (UTC) to Modified Julian Date (UTC)
pub fn jd_to_mjd(jd: JdUtc) -> MJD {
    jd - JDTOMJD
}

/// Transformation from Modified Julian Date (UTC) to Julian Date (UTC)
pub fn mjd_to_jd(mjd: MJD) -> JdUtc {
    mjd + JDTOMJD
}

/// Transformation from date in the format YYYY MM DD.FFFFF (UTC) to Julian Date (UTC)
///
/// Argument
/// --------
/// * `date_str`: a string representing the date in the format YYYY MM DD.FFFFF in the UTC frame,
///   as found in columns 16-32 of an MPC 80-column observation
///
/// Return
/// ------
/// * a float representing the input date in julian date (JD) in the UTC frame
pub fn frac_date_to_jd(date_str: &str) -> Result<JdUtc, String> {
    let parts: Vec<&str> = date_str.split_whitespace().collect();
    if parts.len() != 3 {
        return Err("Invalid format, expected: YYYY MM DD.FFFFF".to_string());
    }

    let year = i32::from_str(parts[0]).map_err(|_| "invalid year")?;
    let month = u8::from_str(parts[1]).map_err(|_| "invalid month")?;
    let day_fraction = f64::from_str(parts[2]).map_err(|_| "invalid frac day")?;
    if !(1.0..32.0).contains(&day_fraction) {
        return Err(format!("invalid day: {day_fraction}"));
    }

    let day = day_fraction.trunc() as u8;
    let fraction = day_fraction - day as f64;

    let midnight = Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
        .map_err(|e| format!("invalid calendar date: {e}"))?;

    Ok(midnight.to_jde_utc_days() + fraction)
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 polynomial for the mean sidereal time at 0h UT1, plus the
/// fractional-day rotation scaled from solar to sidereal rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale). UTC is an acceptable
///   stand-in at the precision this crate needs (|UT1 − UTC| < 0.9 s).
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    let h = tjm.fract() * DPI;
    (gmst0 + h * RAP).rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_jd_mjd() {
        assert_eq!(jd_to_mjd(2459215.5), 59215.0);
        assert_eq!(mjd_to_jd(59216.0), 2459216.5);
    }

    #[test]
    fn test_frac_date_to_jd() {
        assert_relative_eq!(
            frac_date_to_jd("2021 1 1.0").unwrap(),
            2459215.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            frac_date_to_jd("2021 01 01.5").unwrap(),
            2459216.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            frac_date_to_jd("2014 04 28.98950").unwrap(),
            2456776.4895,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            frac_date_to_jd("1976 09 20.93878").unwrap(),
            2443042.43878,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_frac_date_to_jd_errors() {
        assert!(frac_date_to_jd("2021 1").is_err());
        assert!(frac_date_to_jd("20xx 09 15.23433").is_err());
        assert!(frac_date_to_jd("2021 13 01.5").is_err());
        assert!(frac_date_to_jd("2021 01 00.5").is_err());
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        assert_relative_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-9);

        assert_relative_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-9);
    }
}
