use crate::constants::Degree;

/// Split a sexagesimal string into its (whole, minutes, seconds) components.
///
/// Accepts `A B C.C` and the low-precision `A B.B` form (seconds then default to zero).
fn sexagesimal_parts(field: &str) -> Option<(&str, f64, f64)> {
    let parts: Vec<&str> = field.split_whitespace().collect();
    match parts.as_slice() {
        [a, m, s] => Some((*a, m.parse().ok()?, s.parse().ok()?)),
        [a, m] => Some((*a, m.parse().ok()?, 0.0)),
        _ => None,
    }
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///   (or `HH MM.MMM`)
///
/// Returns
/// -------
/// * The right ascension in degrees, or `None` if the input format is invalid.
pub fn parse_ra_to_deg(ra: &str) -> Option<Degree> {
    let (h, m, s) = sexagesimal_parts(ra)?;
    let h: f64 = h.parse().ok()?;
    Some((h + m / 60.0 + s / 3600.0) * 15.0)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: a string representing the declination in the format `±DD MM SS.S`
///   (or `±DD MM.MM`)
///
/// Returns
/// -------
/// * The declination in degrees, or `None` if the input format is invalid.
pub fn parse_dec_to_deg(dec: &str) -> Option<Degree> {
    let (d, m, s) = sexagesimal_parts(dec)?;
    let sign = if d.starts_with('-') { -1.0 } else { 1.0 };
    let d: f64 = d.trim_start_matches(&['-', '+'][..]).parse().ok()?;
    Some(sign * (d + m / 60.0 + s / 3600.0))
}
