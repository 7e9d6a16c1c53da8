//! Conversions between semantic values and instrument text.
//!
//! Outgoing reals are rendered as plain decimals (`1.5`, `-0.25`, `0.0001`),
//! which every SCPI-style parser accepts. Incoming replies may use any of the
//! forms instruments emit: leading `+`, scientific notation
//! (`+1.500000E+00`), trailing whitespace or terminators.

use crate::error::{IviError, IviResult};

/// Render a real in the instrument's decimal syntax.
///
/// Non-finite values have no decimal form and are refused before reaching the
/// session.
pub fn format_real(attribute: &'static str, value: f64) -> IviResult<String> {
    if !value.is_finite() {
        return Err(IviError::UnsupportedValue {
            attribute,
            value: value.to_string(),
        });
    }
    // Display for f64 never uses exponents or separators
    Ok(format!("{}", value))
}

pub fn parse_real(reply: &str) -> IviResult<f64> {
    let text = reply.trim();
    if text.is_empty() {
        return Err(IviError::decode("real", reply));
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IviError::decode("real", reply))
}

/// Parse a real followed by a unit suffix, e.g. `1.00VP`.
pub fn parse_real_with_unit(reply: &str, unit: &str) -> IviResult<f64> {
    let text = reply.trim();
    let number = text
        .strip_suffix(unit)
        .or_else(|| {
            let split = text.len().checked_sub(unit.len())?;
            let (number, suffix) = text.split_at_checked(split)?;
            suffix.eq_ignore_ascii_case(unit).then_some(number)
        })
        .ok_or_else(|| IviError::decode("real with unit", reply))?;
    parse_real(number).map_err(|_| IviError::decode("real with unit", reply))
}

pub fn parse_bool(reply: &str) -> IviResult<bool> {
    match reply.trim().to_ascii_uppercase().as_str() {
        "1" | "ON" => Ok(true),
        "0" | "OFF" => Ok(false),
        _ => Err(IviError::decode("boolean", reply)),
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Counts come back as integers from some instruments and as reals in
/// scientific notation from others.
pub fn parse_count(reply: &str) -> IviResult<u32> {
    let text = reply.trim();
    if let Ok(count) = text.trim_start_matches('+').parse::<u32>() {
        return Ok(count);
    }
    let value = parse_real(reply).map_err(|_| IviError::decode("count", reply))?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(IviError::decode("count", reply));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reals_render_without_exponent() {
        assert_eq!(format_real("amplitude", 1.5).unwrap(), "1.5");
        assert_eq!(format_real("amplitude", -0.25).unwrap(), "-0.25");
        assert_eq!(format_real("frequency", 1.0e6).unwrap(), "1000000");
        assert_eq!(format_real("offset", 1.0e-4).unwrap(), "0.0001");
    }

    #[test]
    fn non_finite_reals_are_refused() {
        let err = format_real("frequency", f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            IviError::UnsupportedValue {
                attribute: "frequency",
                ..
            }
        ));
        assert!(format_real("frequency", f64::NAN).is_err());
    }

    #[test]
    fn reals_parse_in_instrument_forms() {
        assert_eq!(parse_real("1.500000E+00").unwrap(), 1.5);
        assert_eq!(parse_real("+5.000000000000000E+01\n").unwrap(), 50.0);
        assert_eq!(parse_real(" -2.5 ").unwrap(), -2.5);
        assert_eq!(parse_real("9.9E+37").unwrap(), 9.9e37);
    }

    #[test]
    fn malformed_real_keeps_raw_reply() {
        match parse_real("1.5E+").unwrap_err() {
            IviError::Decode { expected, reply } => {
                assert_eq!(expected, "real");
                assert_eq!(reply, "1.5E+");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parse_real("").is_err());
        assert!(parse_real("NaN").is_err());
        assert!(parse_real("inf").is_err());
        assert!(parse_real("-Infinity").is_err());
    }

    #[test]
    fn unit_suffix_is_stripped() {
        assert_eq!(parse_real_with_unit("1.00VP", "VP").unwrap(), 1.0);
        assert_eq!(parse_real_with_unit("0.25vp\r\n", "VP").unwrap(), 0.25);
        assert!(parse_real_with_unit("1.00VR", "VP").is_err());
        assert!(parse_real_with_unit("VP", "VP").is_err());
    }

    #[test]
    fn booleans_accept_numeric_and_keyword() {
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("0\n").unwrap());
        assert!(!parse_bool("OFF").unwrap());
        assert!(parse_bool("2").is_err());
        assert_eq!(format_bool(true), "ON");
    }

    #[test]
    fn counts_accept_integer_and_real() {
        assert_eq!(parse_count("5").unwrap(), 5);
        assert_eq!(parse_count("+1.000000000000000E+02").unwrap(), 100);
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("-1").is_err());
    }
}
