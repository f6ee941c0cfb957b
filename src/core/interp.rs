/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`
///
/// A degenerate range (`a == b`) yields 0.
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, -1.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 3.0), 4.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(2.0, 9.0, 5.5), 0.5);
        assert_eq!(inverse_lerp(2.0, 9.0, 1.0), 0.0);
        assert_eq!(inverse_lerp(2.0, 9.0, 12.0), 1.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 3.0), 0.0);
    }
}
