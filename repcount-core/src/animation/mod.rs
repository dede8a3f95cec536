//! Two-frame push-up animation cadence

pub mod frame;

pub use frame::{FrameKind, FrameScheduler};
