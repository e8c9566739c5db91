/// `linear_interp(y0, y1, frac)` is linear interpolation of `y0` and `y1` with fraction `frac`
///
/// # Arguments:
///
/// * `y0`, `y1` - The two y-values, a straight line can be drawn through these with an x-distance of 1.0
///
/// * `frac` - The fractional x-distance, in `[0.0, 1.0]`
pub fn linear_interp(y0: f32, y1: f32, frac: f32) -> f32 {
    y0 + ((y1 - y0) * frac)
}

/// `is_almost(v1, v2, e)` is true iff `v1` is within `e` of `v2`
pub fn is_almost(v1: f32, v2: f32, eps: f32) -> bool {
    fabs(v1 - v2) <= eps
}

/// `fabs(v)` is the absolute value of `v`
pub fn fabs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}

/// `round_to_int(v)` is `v` rounded to the nearest integer, halfway cases round away from zero
///
/// Values beyond the range of `i32` saturate at `i32::MIN` or `i32::MAX`, NaN becomes zero.
pub fn round_to_int(v: f32) -> i32 {
    if v < 0.0 {
        (v - 0.5_f32) as i32
    } else {
        (v + 0.5_f32) as i32
    }
}

/// `clamp(v, lo, hi)` is `v` limited to `[lo, hi]`
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// `fract(v)` is the fractional part of a non-negative `v`, in `[0.0, 1.0)`
pub fn fract(v: f32) -> f32 {
    v - (v as u32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_interp_endpoints() {
        assert_eq!(linear_interp(0.0, 1.0, 0.0), 0.0);
        assert_eq!(linear_interp(0.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn lin_interp_both_non_zero() {
        assert_eq!(linear_interp(10.0, 40.0, 1.0 / 3.0), 20.0);
    }

    #[test]
    fn round_goes_to_nearest() {
        assert_eq!(round_to_int(0.49), 0);
        assert_eq!(round_to_int(0.51), 1);
        assert_eq!(round_to_int(-0.49), 0);
        assert_eq!(round_to_int(-0.51), -1);
    }

    #[test]
    fn round_halfway_goes_away_from_zero() {
        assert_eq!(round_to_int(2.5), 3);
        assert_eq!(round_to_int(-2.5), -3);
    }

    #[test]
    fn round_saturates_instead_of_overflowing() {
        assert_eq!(round_to_int(1.0e12), i32::MAX);
        assert_eq!(round_to_int(-1.0e12), i32::MIN);
        assert_eq!(round_to_int(f32::NAN), 0);
    }

    #[test]
    fn clamp_limits_both_ends() {
        assert_eq!(clamp(-1.0, 0.0, 5.0), 0.0);
        assert_eq!(clamp(6.0, 0.0, 5.0), 5.0);
        assert_eq!(clamp(2.5, 0.0, 5.0), 2.5);
    }

    #[test]
    fn fract_of_whole_number_is_zero() {
        assert_eq!(fract(3.0), 0.0);
        assert!(is_almost(fract(3.25), 0.25, 1e-6));
    }
}
