/// Linear interpolation from `a` to `b` by `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping is applied. A degenerate input range maps everything to `out_min`.
pub fn map_value(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / span + out_min
}

/// Euclidean remainder that is always in `[0, m)` for positive `m`.
pub(crate) fn wrap_index(i: i64, m: usize) -> usize {
    let m = m as i64;
    i.rem_euclid(m) as usize
}
