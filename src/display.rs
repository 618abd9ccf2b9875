//! Rendering of evaluated numbers for the result line.

use std::fmt;

/// Number of fractional digits kept when a result is not an integer.
pub const DEFAULT_PRECISION: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Fractional digits kept for non-integer results.
    pub precision: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// A finite result, already rounded for display.
///
/// Non-integer values are rounded to `precision` fractional digits so that
/// floating point noise like `0.1 + 0.2` shows as `0.3`. The rendered form is
/// the shortest decimal that reads back as the same value, with no exponent,
/// so it can be fed back into the keypad as input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayValue {
    value: f64,
}

impl DisplayValue {
    pub fn new(value: f64, options: &DisplayOptions) -> Self {
        let value = if value.fract() == 0.0 {
            value
        } else {
            round_to_precision(value, options.precision)
        };
        // Normalizes -0 to 0.
        Self { value: value + 0.0 }
    }

    pub fn zero() -> Self {
        Self { value: 0.0 }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Fractional digits needed to write any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Rounds on the exact decimal expansion of `value`, half away from zero.
///
/// Ties such as `0.00048828125` at ten digits go up in magnitude, where
/// `{:.N}` formatting would round them to even.
fn round_to_precision(value: f64, precision: usize) -> f64 {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS.max(precision + 1), value.abs());
    let Some((int_part, fraction)) = exact.split_once('.') else {
        return value;
    };
    let mut digits: Vec<char> = int_part.chars().chain(fraction.chars().take(precision)).collect();
    if matches!(fraction[precision..].chars().next(), Some('5'..='9')) {
        increment(&mut digits);
    }
    let int_len = digits.len() - precision;
    digits.insert(int_len, '.');
    let text: String = digits.into_iter().collect();
    let rounded = text.parse::<f64>().unwrap_or(value.abs());
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Adds one unit in the last place of a decimal digit string.
fn increment(digits: &mut Vec<char>) {
    for digit in digits.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return;
        }
    }
    digits.insert(0, '1');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(value: f64) -> String {
        DisplayValue::new(value, &DisplayOptions::default()).to_string()
    }

    #[test]
    fn integers_render_without_fraction() {
        assert_eq!(show(4.0), "4");
        assert_eq!(show(-12.0), "-12");
        assert_eq!(show(1e21), "1000000000000000000000");
    }

    #[test]
    fn fractions_round_to_ten_places() {
        assert_eq!(show(1.0 / 3.0), "0.3333333333");
        assert_eq!(show(2.0 / 3.0), "0.6666666667");
        assert_eq!(show(0.1 + 0.2), "0.3");
        assert_eq!(show(0.5), "0.5");
        assert_eq!(show(1.0 - 1e-12), "1");
        assert_eq!(show(99.99999999999), "100");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        // 1/2048 is exactly 0.00048828125.
        assert_eq!(show(1.0 / 2048.0), "0.0004882813");
        assert_eq!(show(-1.0 / 2048.0), "-0.0004882813");
        assert_eq!(show(3.0 / 2048.0), "0.0014648438");
        let options = DisplayOptions { precision: 1 };
        assert_eq!(DisplayValue::new(0.25, &options).to_string(), "0.3");
        assert_eq!(DisplayValue::new(-0.25, &options).to_string(), "-0.3");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        assert_eq!(show(-0.0), "0");
        assert_eq!(show(-1e-12), "0");
    }

    #[test]
    fn custom_precision() {
        let options = DisplayOptions { precision: 2 };
        assert_eq!(DisplayValue::new(1.0 / 3.0, &options).to_string(), "0.33");
        assert_eq!(DisplayValue::new(2.5, &options).to_string(), "2.5");
    }

    #[test]
    fn tiny_values_stay_positional() {
        assert_eq!(show(1e-7), "0.0000001");
    }
}
