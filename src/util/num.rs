/// Converts a stack depth to `f64`.
///
/// Depths beyond `u32::MAX` saturate; the operand stack never gets close to
/// that in practice, and the saturated value is still exactly representable.
///
/// ## Example
/// ```
/// use stackcalc::util::num::depth_to_f64;
///
/// assert_eq!(depth_to_f64(3), 3.0);
/// ```
#[must_use]
pub fn depth_to_f64(depth: usize) -> f64 {
    f64::from(u32::try_from(depth).unwrap_or(u32::MAX))
}

/// Parses a literal magnitude into an `f64`.
///
/// `inf` and `nan` map to the IEEE special values; any other text goes
/// through `str::parse` and yields `None` when that fails.
///
/// ## Example
/// ```
/// use stackcalc::util::num::parse_magnitude;
///
/// assert_eq!(parse_magnitude("2.5"), Some(2.5));
/// assert!(parse_magnitude("inf").is_some_and(f64::is_infinite));
/// assert!(parse_magnitude("nan").is_some_and(f64::is_nan));
/// assert_eq!(parse_magnitude("2.5.1"), None);
/// ```
#[must_use]
pub fn parse_magnitude(magnitude: &str) -> Option<f64> {
    match magnitude {
        "inf" => Some(f64::INFINITY),
        "nan" => Some(f64::NAN),
        digits => digits.parse().ok(),
    }
}
