//! Numeric formatting for the human-readable stat lines.
//!
//! The API has always reported the average to four *significant* figures
//! (not four decimal places) and min/max in shortest-float form with a
//! trailing `.0` kept on whole numbers. Both helpers reproduce that output
//! exactly.

/// Formats `value` to four significant figures.
///
/// Trailing zeros are stripped, but at least one digit is kept after the
/// decimal point: `75.0` stays `"75.0"`, `75.666…` becomes `"75.67"`.
pub(crate) fn four_significant(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (3 - exponent).max(0) as usize;
    keep_one_decimal(format!("{value:.decimals$}"))
}

/// Formats `value` in shortest form, keeping `.0` on whole numbers
/// (`70` prints as `"70.0"`, `70.5` as `"70.5"`).
pub(crate) fn plain_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn keep_one_decimal(formatted: String) -> String {
    if !formatted.contains('.') {
        return format!("{formatted}.0");
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_significant_keeps_decimal_on_whole_numbers() {
        assert_eq!(four_significant(75.0), "75.0");
        assert_eq!(four_significant(100.0), "100.0");
    }

    #[test]
    fn four_significant_rounds_to_four_figures() {
        assert_eq!(four_significant(75.66666), "75.67");
        assert_eq!(four_significant(71.66378), "71.66");
        assert_eq!(four_significant(8.5), "8.5");
        assert_eq!(four_significant(9.999999), "10.0");
        assert_eq!(four_significant(0.0012344), "0.001234");
    }

    #[test]
    fn four_significant_handles_sign_and_zero() {
        assert_eq!(four_significant(0.0), "0.0");
        assert_eq!(four_significant(-75.66666), "-75.67");
    }

    #[test]
    fn plain_float_keeps_point_zero() {
        assert_eq!(plain_float(70.0), "70.0");
        assert_eq!(plain_float(70.5), "70.5");
        assert_eq!(plain_float(-3.0), "-3.0");
    }
}
