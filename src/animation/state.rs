use std::time::Duration;

use super::{Animatable, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// An explicit interpolation task on an animation timeline.
///
/// Given `(from, to, duration, curve)` it yields intermediate values each
/// time it is advanced and settles exactly at `to` once the duration has
/// elapsed. Times are positions on the caller's timeline, not wall-clock
/// instants, so the task can be driven by any scheduler.
pub struct AnimationState<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Value the animation settles at
    target: T,
    /// Value when animation started
    start: T,
    /// Timeline position the animation started at
    start_time: Duration,
    /// Transition configuration
    transition: Transition,
    /// Whether an interpolation is in flight
    running: bool,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            start_time: Duration::ZERO,
            transition,
            running: false,
        }
    }

    /// Start animating from the current value to `new_target`, beginning at
    /// timeline position `at`.
    pub fn animate_to(&mut self, new_target: T, at: Duration) {
        // Don't restart if we're already animating to this target
        if self.running && new_target == self.target {
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.start_time = at;
        self.running = true;
    }

    /// Advance the animation to timeline position `now`
    pub fn advance(&mut self, now: Duration) -> AdvanceResult<T> {
        if !self.running {
            return AdvanceResult::NoChange;
        }

        let delay_end = self.start_time + self.transition.delay;
        if now <= delay_end {
            // Still in delay period
            return AdvanceResult::NoChange;
        }

        let elapsed = now - delay_end;
        let new_value = if elapsed >= self.transition.duration {
            self.running = false;
            self.target.clone()
        } else {
            let t = elapsed.as_secs_f64() / self.transition.duration.as_secs_f64();
            T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
        };

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    /// Settle at the target immediately
    pub fn finish(&mut self) {
        self.current = self.target.clone();
        self.running = false;
    }

    /// Check if animation is still running
    pub fn is_animating(&self) -> bool {
        self.running
    }

    /// Timeline position at which the current interpolation settles
    pub fn end_time(&self) -> Duration {
        self.start_time + self.transition.total()
    }

    /// Get current value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Get target value
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_animation_state_new() {
        let state = AnimationState::new(0.0f64, Transition::linear(ms(300)));

        assert_eq!(*state.current(), 0.0);
        assert_eq!(*state.target(), 0.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_animation_state_animate_to() {
        let mut state = AnimationState::new(0.0f64, Transition::linear(ms(300)));

        state.animate_to(100.0, ms(0));

        assert_eq!(*state.target(), 100.0);
        assert!(state.is_animating());
        assert_eq!(state.end_time(), ms(300));
    }

    #[test]
    fn test_animation_state_animate_to_same_target() {
        let mut state = AnimationState::new(0.0f64, Transition::linear(ms(300)));

        state.animate_to(100.0, ms(0));
        // Same target should not restart
        state.animate_to(100.0, ms(200));
        assert_eq!(state.end_time(), ms(300));
    }

    #[test]
    fn test_linear_midpoint_and_settle() {
        let mut state = AnimationState::new(0.0f64, Transition::linear(ms(400)));
        state.animate_to(10.0, ms(0));

        assert_eq!(state.advance(ms(200)), AdvanceResult::Changed(5.0));
        assert_eq!(state.advance(ms(400)), AdvanceResult::Changed(10.0));
        assert!(!state.is_animating());
        assert_eq!(state.advance(ms(800)), AdvanceResult::NoChange);
    }

    #[test]
    fn test_settles_exactly_at_target_when_overshooting_time() {
        let mut state = AnimationState::new(0.05f64, Transition::ease_out(ms(650)));
        state.animate_to(0.8, ms(0));

        state.advance(ms(10_000));
        assert_eq!(*state.current(), 0.8);
    }

    #[test]
    fn test_ease_out_runs_ahead_of_linear() {
        let mut eased = AnimationState::new(0.0f64, Transition::ease_out(ms(100)));
        let mut linear = AnimationState::new(0.0f64, Transition::linear(ms(100)));
        eased.animate_to(1.0, ms(0));
        linear.animate_to(1.0, ms(0));

        eased.advance(ms(30));
        linear.advance(ms(30));
        assert!(eased.current() > linear.current());
    }

    #[test]
    fn test_delay_holds_value() {
        let transition = Transition::new(ms(100), TimingFunction::Linear).delay(ms(50));
        let mut state = AnimationState::new(0.0f64, transition);
        state.animate_to(1.0, ms(0));

        assert_eq!(state.advance(ms(40)), AdvanceResult::NoChange);
        assert_eq!(state.advance(ms(100)), AdvanceResult::Changed(0.5));
        assert_eq!(state.end_time(), ms(150));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let mut state = AnimationState::new(0.0f64, Transition::linear(Duration::ZERO));
        state.animate_to(3.0, ms(5));

        assert_eq!(state.advance(ms(6)), AdvanceResult::Changed(3.0));
    }

    #[test]
    fn test_animation_state_set_immediate() {
        let mut state = AnimationState::new(0.0f64, Transition::linear(ms(300)));
        state.animate_to(100.0, ms(0));

        state.set_immediate(50.0);

        assert_eq!(*state.current(), 50.0);
        assert_eq!(*state.target(), 50.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_finish() {
        let mut state = AnimationState::new(1.0f64, Transition::linear(ms(300)));
        state.animate_to(2.0, ms(0));
        state.finish();
        assert_eq!(*state.current(), 2.0);
        assert!(!state.is_animating());
    }
}
