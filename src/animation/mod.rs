mod animatable;
mod clock;
mod state;
mod timing;

use std::time::Duration;

pub use animatable::Animatable;
pub use clock::AnimationClock;
pub use state::{AdvanceResult, AnimationState};
pub use timing::TimingFunction;

/// Configuration for how a value should animate when its target changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the interpolation
    pub duration: Duration,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before the interpolation starts
    pub delay: Duration,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration: Duration, timing: TimingFunction) -> Self {
        Self {
            duration,
            timing,
            delay: Duration::ZERO,
        }
    }

    /// Linear transition over `duration`
    pub fn linear(duration: Duration) -> Self {
        Self::new(duration, TimingFunction::Linear)
    }

    /// Ease-out transition over `duration`
    pub fn ease_out(duration: Duration) -> Self {
        Self::new(duration, TimingFunction::EaseOut)
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Total time from start until the value settles
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::ease_out(Duration::from_millis(250))
    }
}
