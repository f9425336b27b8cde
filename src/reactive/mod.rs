pub mod invalidation;

pub use invalidation::{ChangeFlags, FrameRequest, WidgetId};
