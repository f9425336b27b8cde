//! Maps host instants onto an animation timeline.
//!
//! The timeline only advances while the clock is active. Time spent
//! suspended (for example while the host is backgrounded) is excluded, so
//! animations pick up exactly where they left off on resume.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Instant the current active segment began, `None` while suspended
    segment_start: Option<Instant>,
    /// Timeline length accumulated by previous active segments
    accumulated: Duration,
}

impl AnimationClock {
    /// Create a clock whose timeline starts at zero at `now`
    pub fn start_at(now: Instant) -> Self {
        Self {
            segment_start: Some(now),
            accumulated: Duration::ZERO,
        }
    }

    /// Create a clock starting at the current instant
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Timeline position at `now`.
    ///
    /// Instants earlier than the segment start count as the segment start.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.segment_start {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Freeze the timeline at `now`. Does nothing if already suspended.
    pub fn suspend_at(&mut self, now: Instant) {
        if let Some(start) = self.segment_start.take() {
            self.accumulated += now.saturating_duration_since(start);
            log::debug!("Animation clock suspended at {:?}", self.accumulated);
        }
    }

    /// Continue the timeline from `now`. Does nothing if not suspended.
    pub fn resume_at(&mut self, now: Instant) {
        if self.segment_start.is_none() {
            self.segment_start = Some(now);
            log::debug!("Animation clock resumed at {:?}", self.accumulated);
        }
    }

    pub fn suspend(&mut self) {
        self.suspend_at(Instant::now());
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn is_suspended(&self) -> bool {
        self.segment_start.is_none()
    }
}
