/// Highest level the experience table is commonly quoted for ("virtual" levels).
/// Feed levels above it are rejected by the parser.
pub const MAX_VIRTUAL_LEVEL: i64 = 127;

/// Cumulative experience needed to reach `level`.
///
/// Each term is floored before summing and the sum is floored once after the
/// division by four; flooring per term after dividing gives different values.
/// Levels of 1 or below need no experience. Levels whose total no longer fits
/// in an `i64` return `i64::MAX`.
pub fn experience_required_for(level: i64) -> i64 {
    (1..level)
        .map(|l| (l as f64 + 300.0 * 2f64.powf(l as f64 / 7.0)).floor() as i64)
        .try_fold(0i64, |sum, term| sum.checked_add(term))
        .map_or(i64::MAX, |sum| sum / 4)
}
