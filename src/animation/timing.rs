//! Timing functions (easing curves) for interpolation tasks.
//!
//! A timing function maps normalized time `t` in `[0, 1]` to an
//! interpolation factor. The indicator uses [`TimingFunction::Linear`] for
//! its rotation and [`TimingFunction::EaseOut`] for each head/tail half step.
//! Any other curve can be supplied through [`TimingFunction::custom`].
//!
//! ```
//! use material_indicator::animation::TimingFunction;
//!
//! let eased = TimingFunction::EaseOut.evaluate(0.5);
//! assert!(eased > 0.5);
//! ```

use std::sync::Arc;

/// Timing function that controls the interpolation curve
#[derive(Clone)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts fast, ends slow
    EaseOut,
    /// Custom timing function
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t.
    ///
    /// `t` is clamped to `[0, 1]`. Both endpoints map exactly onto 0.0 and
    /// 1.0 for the built-in curves.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_out_front_loaded() {
        let early = TimingFunction::EaseOut.evaluate(0.25);
        let late = TimingFunction::EaseOut.evaluate(1.0) - TimingFunction::EaseOut.evaluate(0.75);
        assert!(early > 0.25);
        assert!(late < 0.25);
    }

    #[test]
    fn test_endpoints_are_exact() {
        for curve in [TimingFunction::Linear, TimingFunction::EaseOut] {
            assert_eq!(curve.evaluate(0.0), 0.0, "{:?}", curve);
            assert_eq!(curve.evaluate(1.0), 1.0, "{:?}", curve);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(TimingFunction::EaseOut.evaluate(-1.0), 0.0);
        assert_eq!(TimingFunction::EaseOut.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_ease_out_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            let value = TimingFunction::EaseOut.evaluate(i as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.4), 0.0);
        assert_eq!(step.evaluate(0.6), 1.0);
        assert_eq!(format!("{:?}", step), "Custom");
    }
}
