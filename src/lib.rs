//! A Material-style circular activity indicator.
//!
//! The indicator is a stroked arc that rotates continuously while its head
//! and tail chase each other around the circle. [`widgets::MaterialIndicator`]
//! is the widget, [`host::IndicatorHostView`] embeds it behind a plain
//! property interface and [`host::HostLoop`] drives it from a calloop event
//! loop.

pub mod animation;
pub mod error;
pub mod host;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

pub use error::{IndicatorError, Result};

pub mod prelude {
    pub use crate::animation::{AnimationClock, TimingFunction, Transition};
    pub use crate::error::{IndicatorError, Result};
    pub use crate::host::{HostConfig, HostLoop, IndicatorHostView};
    pub use crate::layout::{Constraints, Size};
    pub use crate::renderer::{Frame, PaintContext, SoftwareRenderer};
    pub use crate::widgets::spinner::{
        arc_path, ArcPath, HeadTailPhase, Progress, SpinnerAnimator, SpinnerTiming,
    };
    pub use crate::widgets::{AppearanceConfig, Color, MaterialIndicator, Rect, Widget};
}
