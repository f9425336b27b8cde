//! calloop driver for an [`IndicatorHostView`].
//!
//! A re-arming timer advances the animation once per frame interval. A ping
//! source wakes the loop when a property setter produced a new frame between
//! ticks, so the host can present it without waiting for the next tick.

use std::time::{Duration, Instant};

use calloop::ping::make_ping;
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, RegistrationToken};

use crate::animation::AnimationClock;
use crate::error::Result;
use crate::renderer::Frame;
use crate::widgets::Color;

use super::IndicatorHostView;

type FrameCallback = Box<dyn FnMut(&Frame)>;

/// Host loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Delay between animation ticks
    pub frame_interval: Duration,
    /// Surface clear color; `None` keeps the view's own background
    pub background: Option<Color>,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            background: None,
            scale_factor: 1.0,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn scale_factor(mut self, scale: f32) -> Self {
        self.scale_factor = scale;
        self
    }
}

/// State shared with the event loop callbacks
struct HostState {
    view: IndicatorHostView,
    clock: AnimationClock,
    presented: u64,
    on_frame: Option<FrameCallback>,
}

impl HostState {
    fn tick(&mut self, now: Instant) {
        let elapsed = self.clock.elapsed_at(now);
        match self.view.advance(elapsed) {
            Ok(true) => {
                // The tick's frame already covers any pending property change
                self.view.frame_request().take();
                self.present();
            }
            Ok(false) => {}
            Err(e) => log::error!("Failed to render indicator frame: {}", e),
        }
    }

    fn present(&mut self) {
        if let Some(frame) = self.view.frame() {
            self.presented += 1;
            if let Some(callback) = self.on_frame.as_mut() {
                callback(frame);
            }
        }
    }
}

pub struct HostLoop {
    event_loop: EventLoop<'static, HostState>,
    state: HostState,
    config: HostConfig,
    timer: Option<RegistrationToken>,
    wakeup: Option<RegistrationToken>,
}

impl HostLoop {
    pub fn new(view: IndicatorHostView, config: HostConfig) -> Result<Self> {
        let mut view = match config.background {
            Some(color) => view.background(color),
            None => view,
        };
        view.set_scale_factor(config.scale_factor)?;

        let event_loop: EventLoop<'static, HostState> = EventLoop::try_new()?;

        let (ping, ping_source) = make_ping()?;
        let wakeup = event_loop
            .handle()
            .insert_source(ping_source, |_, _, state: &mut HostState| {
                if state.view.frame_request().take() {
                    state.present();
                }
            })
            .map_err(|e| e.error)?;
        view.frame_request().init_wakeup(ping);

        let mut host = Self {
            event_loop,
            state: HostState {
                view,
                clock: AnimationClock::start(),
                presented: 0,
                on_frame: None,
            },
            config,
            timer: None,
            wakeup: Some(wakeup),
        };
        host.insert_timer()?;

        log::info!(
            "Indicator host loop started ({:?} frame interval)",
            host.config.frame_interval
        );
        Ok(host)
    }

    /// Called with each frame handed to the host for presentation
    pub fn on_frame<F>(&mut self, callback: F)
    where
        F: FnMut(&Frame) + 'static,
    {
        self.state.on_frame = Some(Box::new(callback));
    }

    fn insert_timer(&mut self) -> Result<()> {
        if self.timer.is_some() {
            return Ok(());
        }
        let interval = self.config.frame_interval;
        let token = self
            .event_loop
            .handle()
            .insert_source(
                Timer::from_duration(interval),
                move |deadline, _, state: &mut HostState| {
                    state.tick(deadline.max(Instant::now()));
                    TimeoutAction::ToDuration(interval)
                },
            )
            .map_err(|e| e.error)?;
        self.timer = Some(token);
        Ok(())
    }

    /// Process pending events, waiting at most `timeout`
    pub fn dispatch_once(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.event_loop.dispatch(timeout, &mut self.state)?;
        Ok(())
    }

    /// Run the loop until `duration` has passed or the view is torn down
    pub fn run_for(&mut self, duration: Duration) -> Result<()> {
        let _ = env_logger::try_init();

        let deadline = Instant::now() + duration;
        while !self.state.view.is_torn_down() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            self.dispatch_once(Some(deadline - now))?;
        }
        Ok(())
    }

    /// Stop ticking and freeze the animation timeline
    pub fn suspend(&mut self) {
        if let Some(token) = self.timer.take() {
            self.event_loop.handle().remove(token);
            self.state.clock.suspend();
            log::info!("Indicator host suspended");
        }
    }

    /// Continue ticking from where the timeline was frozen
    pub fn resume(&mut self) -> Result<()> {
        if self.timer.is_none() && !self.state.view.is_torn_down() {
            self.state.clock.resume();
            self.insert_timer()?;
            log::info!("Indicator host resumed");
        }
        Ok(())
    }

    pub fn is_suspended(&self) -> bool {
        self.timer.is_none()
    }

    /// Remove all event sources and tear the view down
    pub fn teardown(&mut self) {
        let handle = self.event_loop.handle();
        if let Some(token) = self.timer.take() {
            handle.remove(token);
        }
        if let Some(token) = self.wakeup.take() {
            handle.remove(token);
        }
        self.state.on_frame = None;
        self.state.view.teardown();
        log::info!("Indicator host torn down");
    }

    pub fn view(&self) -> &IndicatorHostView {
        &self.state.view
    }

    pub fn view_mut(&mut self) -> &mut IndicatorHostView {
        &mut self.state.view
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Position on the animation timeline, excluding suspended time
    pub fn elapsed(&self) -> Duration {
        self.state.clock.elapsed()
    }

    /// Number of frames handed to the host so far
    pub fn frames_presented(&self) -> u64 {
        self.state.presented
    }
}

impl Drop for HostLoop {
    fn drop(&mut self) {
        if !self.state.view.is_torn_down() {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn fast_config() -> HostConfig {
        HostConfig::new().frame_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_config_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.background, None);
        assert_eq!(
            HostConfig::new().background(Color::WHITE).background,
            Some(Color::WHITE)
        );
        assert_eq!(config.scale_factor, 1.0);
        assert_eq!(
            HostConfig::new().frame_interval(Duration::ZERO).frame_interval,
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_view_background_survives_default_config() {
        let view = IndicatorHostView::default().background(Color::WHITE);
        let mut host = HostLoop::new(view, HostConfig::default()).unwrap();
        host.view_mut().refresh().unwrap();

        let frame = host.view().frame().unwrap();
        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_config_background_overrides_view() {
        let view = IndicatorHostView::default().background(Color::WHITE);
        let config = HostConfig::new().background(Color::BLACK);
        let mut host = HostLoop::new(view, config).unwrap();
        host.view_mut().refresh().unwrap();

        let frame = host.view().frame().unwrap();
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_run_presents_frames() {
        let mut host = HostLoop::new(IndicatorHostView::default(), fast_config()).unwrap();
        let seen = Rc::new(Cell::new(0u32));
        let counter = seen.clone();
        host.on_frame(move |frame| {
            assert_eq!(frame.width(), 30);
            counter.set(counter.get() + 1);
        });

        host.run_for(Duration::from_millis(100)).unwrap();

        assert!(host.frames_presented() > 0);
        assert_eq!(u64::from(seen.get()), host.frames_presented());
        let animator = host.view().indicator().animator().unwrap();
        assert!(animator.elapsed() > Duration::ZERO);
        assert!(animator.rotation() > 0.0);
    }

    #[test]
    fn test_suspend_freezes_timeline() {
        let mut host = HostLoop::new(IndicatorHostView::default(), fast_config()).unwrap();
        host.run_for(Duration::from_millis(30)).unwrap();
        host.suspend();
        assert!(host.is_suspended());

        let frozen = host.elapsed();
        let presented = host.frames_presented();
        host.run_for(Duration::from_millis(40)).unwrap();
        assert_eq!(host.elapsed(), frozen);
        assert_eq!(host.frames_presented(), presented);

        host.resume().unwrap();
        assert!(!host.is_suspended());
        host.run_for(Duration::from_millis(15)).unwrap();
        assert!(host.elapsed() > frozen);
        // Suspended time never reaches the timeline
        assert!(host.elapsed() < frozen + Duration::from_millis(40));
    }

    #[test]
    fn test_property_change_wakes_loop() {
        let mut host = HostLoop::new(IndicatorHostView::default(), fast_config()).unwrap();
        host.view_mut().refresh().unwrap();
        host.suspend();

        let presented = host.frames_presented();
        host.view_mut().set_color(Color::TEAL).unwrap();
        host.dispatch_once(Some(Duration::from_millis(50))).unwrap();

        assert_eq!(host.frames_presented(), presented + 1);
        assert!(!host.view().frame_request().is_requested());
    }

    #[test]
    fn test_teardown_stops_ticking() {
        let mut host = HostLoop::new(IndicatorHostView::default(), fast_config()).unwrap();
        host.run_for(Duration::from_millis(20)).unwrap();
        host.teardown();

        assert!(host.view().is_torn_down());
        assert!(host.view().frame().is_none());
        let presented = host.frames_presented();

        let started = Instant::now();
        host.run_for(Duration::from_secs(5)).unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(host.frames_presented(), presented);

        // Resuming a torn down host is a no-op
        host.resume().unwrap();
        assert!(host.is_suspended());
    }
}
