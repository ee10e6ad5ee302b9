/// Numeric conversion helpers.
///
/// Conversions between the interpreter's `f64` values and the integer and
/// text forms they are produced from, without silent precision loss.
pub mod num;
