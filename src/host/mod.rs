//! Embedding the indicator in an imperative host.

mod event_loop;
mod view;

pub use event_loop::{HostConfig, HostLoop};
pub use view::IndicatorHostView;
