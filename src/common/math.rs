/// Division that never panics or yields NaN from a zero denominator.
///
/// `0 / 0` is `0.0`; a nonzero numerator over zero is an infinity carrying the
/// numerator's sign (a NaN numerator is treated as positive).
#[inline]
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 { return numerator / denominator }
    if numerator == 0.0 { 0.0 }
    else if numerator < 0.0 { f64::NEG_INFINITY }
    else { f64::INFINITY }
}

#[cfg(test)]
mod tests {
    use super::safe_divide;

    #[test]
    fn ordinary_division() {
        assert_eq!(safe_divide(3.0, 4.0), 0.75);
        assert_eq!(safe_divide(-1.0, 2.0), -0.5);
    }

    #[test]
    fn zero_over_zero_is_zero() {
        assert_eq!(safe_divide(0.0, 0.0), 0.0);
    }

    #[test]
    fn nonzero_over_zero_is_signed_infinity() {
        assert_eq!(safe_divide(2.0, 0.0), f64::INFINITY);
        assert_eq!(safe_divide(-2.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(safe_divide(f64::NAN, 0.0), f64::INFINITY);
    }
}
