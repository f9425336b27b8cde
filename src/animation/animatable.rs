/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + Send + Sync + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    fn lerp(from: &Self, to: &Self, t: f64) -> Self;
}

impl Animatable for f64 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        from + (to - from) * t
    }
}
