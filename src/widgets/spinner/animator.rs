//! Timing state machine behind the indicator.
//!
//! Two loops share one timeline:
//!
//! - **Rotation** turns the whole arc by 360 degrees every
//!   [`SpinnerTiming::rotation_period`], forever.
//! - **Head/tail** alternately grows `start` (the head) and then `end` (the
//!   tail) by [`SpinnerTiming::increment`] turns, each over one
//!   [`SpinnerTiming::half_step`] with an ease-out curve. The running flag is
//!   checked only once the tail has settled, so a stop request finishes the
//!   current cycle first.
//!
//! Neither `start` nor `end` ever decreases. The illusion of the arc
//! shrinking comes from the tail catching up with the head.

use std::time::Duration;

use crate::animation::{AnimationState, TimingFunction, Transition};

/// Head/tail position in turns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Head of the arc
    pub start: f64,
    /// Tail of the arc
    pub end: f64,
}

impl Progress {
    pub const INITIAL: Progress = Progress {
        start: 0.05,
        end: 0.0,
    };

    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The same arc with the whole turns both values share removed.
    ///
    /// Rendering is unchanged by this, it only keeps the magnitudes small.
    pub fn normalized(&self) -> Progress {
        let turns = self.start.min(self.end).floor();
        Progress {
            start: self.start - turns,
            end: self.end - turns,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Timing constants for both loops
#[derive(Debug, Clone)]
pub struct SpinnerTiming {
    /// Time for one full rotation
    pub rotation_period: Duration,
    /// Curve applied within each rotation period
    pub rotation_timing: TimingFunction,
    /// Duration of one head or tail interpolation
    pub half_step: Duration,
    /// Curve applied to each head or tail interpolation
    pub head_tail_timing: TimingFunction,
    /// Turns added to the head or tail per half step
    pub increment: f64,
    /// Progress before the first half step
    pub initial: Progress,
}

impl SpinnerTiming {
    /// Shortest accepted half step; keeps catch-up loops finite
    pub const MIN_HALF_STEP: Duration = Duration::from_millis(1);

    pub fn rotation_period(mut self, period: Duration) -> Self {
        self.rotation_period = period;
        self
    }

    pub fn rotation_timing(mut self, timing: TimingFunction) -> Self {
        self.rotation_timing = timing;
        self
    }

    pub fn half_step(mut self, half_step: Duration) -> Self {
        self.half_step = half_step.max(Self::MIN_HALF_STEP);
        self
    }

    pub fn head_tail_timing(mut self, timing: TimingFunction) -> Self {
        self.head_tail_timing = timing;
        self
    }

    pub fn increment(mut self, increment: f64) -> Self {
        self.increment = increment.max(0.0);
        self
    }

    pub fn initial(mut self, initial: Progress) -> Self {
        self.initial = initial;
        self
    }

    /// One head half step plus one tail half step
    pub fn cycle(&self) -> Duration {
        self.half_step * 2
    }
}

impl Default for SpinnerTiming {
    fn default() -> Self {
        Self {
            rotation_period: Duration::from_millis(1400),
            rotation_timing: TimingFunction::Linear,
            half_step: Duration::from_millis(650),
            head_tail_timing: TimingFunction::EaseOut,
            increment: 0.75,
            initial: Progress::INITIAL,
        }
    }
}

/// Which half step of the head/tail loop is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadTailPhase {
    /// `start` is moving
    Head,
    /// `end` is moving
    Tail,
    /// The loop has terminated; progress is static
    Stopped,
}

pub struct SpinnerAnimator {
    timing: SpinnerTiming,
    /// Current timeline position
    elapsed: Duration,
    rotation: f64,
    head: AnimationState<f64>,
    tail: AnimationState<f64>,
    /// Last published progress; never moves backwards
    progress: Progress,
    phase: HeadTailPhase,
    /// Timeline position the current half step began at
    step_started: Duration,
    is_loading: bool,
    torn_down: bool,
}

impl SpinnerAnimator {
    pub fn new(timing: SpinnerTiming, is_loading: bool) -> Self {
        let timing = SpinnerTiming {
            half_step: timing.half_step.max(SpinnerTiming::MIN_HALF_STEP),
            ..timing
        };
        let transition = Transition::new(timing.half_step, timing.head_tail_timing.clone());
        let initial = timing.initial;

        let mut animator = Self {
            head: AnimationState::new(initial.start, transition.clone()),
            tail: AnimationState::new(initial.end, transition),
            timing,
            elapsed: Duration::ZERO,
            rotation: 0.0,
            progress: initial,
            phase: HeadTailPhase::Stopped,
            step_started: Duration::ZERO,
            is_loading,
            torn_down: false,
        };
        if is_loading {
            animator.begin_head(Duration::ZERO);
        }
        animator
    }

    /// Move the timeline to `elapsed`.
    ///
    /// Positions at or before the current one are ignored. Every half-step
    /// boundary crossed since the last call is applied, whole cycles in a
    /// single step. Returns true if rotation or progress changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.torn_down || elapsed <= self.elapsed {
            return false;
        }
        self.elapsed = elapsed;

        let rotated = self.advance_rotation(elapsed);
        let progressed = self.advance_head_tail(elapsed);
        rotated || progressed
    }

    fn advance_rotation(&mut self, now: Duration) -> bool {
        let period = self.timing.rotation_period.as_nanos();
        if period == 0 {
            return false;
        }
        let nanos = now.as_nanos();
        let repeats = (nanos / period) as f64;
        let fraction = (nanos % period) as f64 / period as f64;
        let rotation = 360.0 * (repeats + self.timing.rotation_timing.evaluate(fraction));

        // Rotation only ever increases
        if rotation > self.rotation {
            self.rotation = rotation;
            true
        } else {
            false
        }
    }

    fn advance_head_tail(&mut self, now: Duration) -> bool {
        if self.phase == HeadTailPhase::Stopped {
            return false;
        }

        loop {
            let boundary = self.step_started + self.timing.half_step;
            if now < boundary {
                break;
            }
            match self.phase {
                HeadTailPhase::Head => {
                    self.head.finish();
                    self.begin_tail(boundary);
                }
                HeadTailPhase::Tail => {
                    self.tail.finish();
                    self.step_started = boundary;
                    if !self.is_loading {
                        self.phase = HeadTailPhase::Stopped;
                        log::debug!("Head/tail loop stopped at {:?}", boundary);
                        break;
                    }
                    let start = self.skip_cycles(boundary, now);
                    self.begin_head(start);
                }
                HeadTailPhase::Stopped => break,
            }
        }

        match self.phase {
            HeadTailPhase::Head => {
                self.head.advance(now);
            }
            HeadTailPhase::Tail => {
                self.tail.advance(now);
            }
            HeadTailPhase::Stopped => {}
        }
        self.publish()
    }

    /// Apply whole cycles that fit between `boundary` and `now` at once.
    /// Returns the timeline position the next head half step starts at.
    fn skip_cycles(&mut self, boundary: Duration, now: Duration) -> Duration {
        let cycle = self.timing.cycle().as_nanos();
        let skipped = (now - boundary).as_nanos() / cycle;
        if skipped == 0 {
            return boundary;
        }

        let turns = skipped as f64 * self.timing.increment;
        let head = *self.head.current() + turns;
        let tail = *self.tail.current() + turns;
        self.head.set_immediate(head);
        self.tail.set_immediate(tail);
        log::trace!("Skipped {} head/tail cycles", skipped);

        // skipped * cycle <= now - boundary, so this fits in a Duration
        boundary + Duration::from_nanos((skipped * cycle) as u64)
    }

    fn begin_head(&mut self, at: Duration) {
        let target = *self.head.current() + self.timing.increment;
        self.head.animate_to(target, at);
        self.step_started = at;
        self.phase = HeadTailPhase::Head;
    }

    fn begin_tail(&mut self, at: Duration) {
        let target = *self.tail.current() + self.timing.increment;
        self.tail.animate_to(target, at);
        self.step_started = at;
        self.phase = HeadTailPhase::Tail;
    }

    /// Copy the interpolated values out, never letting either one decrease
    fn publish(&mut self) -> bool {
        let next = Progress {
            start: self.progress.start.max(*self.head.current()),
            end: self.progress.end.max(*self.tail.current()),
        };
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    /// Update the running flag.
    ///
    /// `false` lets the current cycle finish and stops at the next cycle
    /// boundary. `true` after the loop has stopped starts a new cycle at the
    /// current timeline position.
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
        if is_loading && self.phase == HeadTailPhase::Stopped && !self.torn_down {
            log::debug!("Head/tail loop restarted at {:?}", self.elapsed);
            self.begin_head(self.elapsed);
        }
    }

    /// Stop both loops for good. Later calls to [`advance`](Self::advance)
    /// do nothing.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::debug!("Spinner animator torn down at {:?}", self.elapsed);
        }
        self.torn_down = true;
        self.phase = HeadTailPhase::Stopped;
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Rotation in degrees; unbounded, render modulo 360
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn phase(&self) -> HeadTailPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_head_tail_running(&self) -> bool {
        self.phase != HeadTailPhase::Stopped
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn timing(&self) -> &SpinnerTiming {
        &self.timing
    }
}

impl Default for SpinnerAnimator {
    fn default() -> Self {
        Self::new(SpinnerTiming::default(), true)
    }
}
