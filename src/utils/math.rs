//! # Interpolation Math
//!
//! Scalar helpers for blending noise values and tints.

/// Clamps a value into `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Linearly interpolates from `a` to `b`, with `t` clamped into `[0, 1]`.
///
/// # Examples
///
/// ```
/// use delve::utils::lerp;
///
/// assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
/// assert_eq!(lerp(2.0, 4.0, 7.0), 4.0);
/// ```
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}

/// Returns where `value` sits between `a` and `b`, clamped into `[0, 1]`.
///
/// Returns 0 when `a == b`.
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    clamp01((value - a) / (b - a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn test_inverse_lerp_descending_range() {
        // 0 at the far end of the range, 1 at the near end
        assert_eq!(inverse_lerp(6.0, 0.0, 6.0), 0.0);
        assert_eq!(inverse_lerp(6.0, 0.0, 0.0), 1.0);
        assert_eq!(inverse_lerp(6.0, 0.0, 3.0), 0.5);
    }

    #[test]
    fn test_inverse_lerp_degenerate_range() {
        assert_eq!(inverse_lerp(1.0, 1.0, 5.0), 0.0);
    }
}
