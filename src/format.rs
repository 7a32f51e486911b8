/// Values whose magnitude is below this threshold are displayed as `0`.
pub const ZERO_THRESHOLD: f64 = 1e-10;

/// Number of significant digits kept in displayed values.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Format `value` into its canonical display string.
///
/// Values closer to zero than [`ZERO_THRESHOLD`] are shown as `0`, which
/// hides the rounding noise of computations such as `sin(180)` in degrees.
/// Other values keep [`SIGNIFICANT_DIGITS`] significant digits and use fixed
/// notation unless the decimal exponent is below -4 or above the number of
/// significant digits, in the manner of C's `%.10g`.
///
/// # Examples
///
/// ```
/// # use calcore::format_number;
/// assert_eq!(format_number(1024.0), "1024");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1.5e20), "1.5e+20");
/// assert_eq!(format_number(1.2e-16), "0");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.abs() < ZERO_THRESHOLD {
        return "0".into();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // rounding to the significant digits first gives the exponent of the
    // displayed value, which may differ from the exponent of `value`
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or_default()),
        None => return scientific,
    };

    let digits = SIGNIFICANT_DIGITS as i32;
    if exponent < -4 || exponent >= digits {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Remove trailing zeros after the decimal point, and the point itself if
/// nothing is left after it.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::{format_number, trim_fraction};
    use test_case::test_case;

    #[test_case(4.0 => "4" ; "integer")]
    #[test_case(-4.0 => "-4" ; "negative integer")]
    #[test_case(1024.0 => "1024" ; "power of two")]
    #[test_case(0.5 => "0.5" ; "fraction")]
    #[test_case(1.0 / 3.0 => "0.3333333333" ; "ten significant digits")]
    #[test_case(2.0 / 3.0 => "0.6666666667" ; "last digit is rounded")]
    #[test_case(123_456.789_012_345 => "123456.789" ; "digits split around the point")]
    #[test_case(1e-4 => "0.0001" ; "smallest fixed exponent")]
    #[test_case(1.5e-5 => "1.5e-05" ; "small values are exponential")]
    #[test_case(1_234_567_890.0 => "1234567890" ; "largest fixed exponent")]
    #[test_case(12_345_678_901.0 => "1.23456789e+10" ; "large values are exponential")]
    #[test_case(9_999_999_999.6 => "1e+10" ; "rounding moves the exponent")]
    #[test_case(-2.5e-7 => "-2.5e-07" ; "negative exponential")]
    #[test_case(1e100 => "1e+100" ; "three digit exponent")]
    fn format(value: f64) -> String {
        format_number(value)
    }

    #[test]
    fn snaps_to_zero() {
        for value in &[0.0, -0.0, 1e-11, -1e-11, 1.224_646_799_147_353_2e-16, 9.99e-11] {
            assert_eq!(format_number(*value), "0");
        }
        assert_ne!(format_number(1e-10), "0");
    }

    #[test]
    fn trims() {
        assert_eq!(trim_fraction("1.500"), "1.5");
        assert_eq!(trim_fraction("2.000"), "2");
        assert_eq!(trim_fraction("100"), "100");
    }
}
