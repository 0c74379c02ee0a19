use crate::CoreError;

/// Floating point type used throughout the controller
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Strictly greater than zero. NaN is rejected, `+inf` passes.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

/// Constrain `v` to the closed interval `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics and never returns NaN: a NaN
/// input maps to `min`. Callers are expected to have validated `min <= max`.
pub fn clamp(v: Real, min: Real, max: Real) -> Real {
    if v.is_nan() || v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert_eq!(ensure_positive(2.5, "x"), Ok(2.5));
        assert_eq!(
            ensure_positive(0.0, "x"),
            Err(CoreError::InvalidArg { what: "x" })
        );
        assert!(ensure_positive(-1.0, "x").is_err());
        assert!(ensure_positive(Real::NAN, "x").is_err());
        assert!(ensure_positive(Real::NEG_INFINITY, "x").is_err());
    }

    #[test]
    fn ensure_positive_accepts_infinity() {
        assert_eq!(ensure_positive(Real::INFINITY, "x"), Ok(Real::INFINITY));
        assert_eq!(ensure_positive(5e-324, "x"), Ok(5e-324));
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 1.0, 3.0), 3.0);
        assert_eq!(clamp(0.5, 1.0, 3.0), 1.0);
        assert_eq!(clamp(2.0, 1.0, 3.0), 2.0);
        assert_eq!(clamp(1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn clamp_never_returns_nan() {
        assert_eq!(clamp(Real::NAN, 1.0, 3.0), 1.0);
        assert_eq!(clamp(Real::INFINITY, 1.0, 3.0), 3.0);
        assert_eq!(clamp(Real::NEG_INFINITY, 1.0, Real::INFINITY), 1.0);
        assert_eq!(clamp(7.0, 1.0, Real::INFINITY), 7.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamp_stays_in_range(v in -1e6_f64..1e6, lo in -1e3_f64..1e3, width in 0.0_f64..1e3) {
            let hi = lo + width;
            let c = clamp(v, lo, hi);
            prop_assert!(c >= lo && c <= hi);
        }
    }
}
