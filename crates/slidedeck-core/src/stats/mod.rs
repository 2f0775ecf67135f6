//! Count-up animation for numeric stat widgets

mod animator;
pub mod format;

pub use animator::{StatWidget, StatsAnimator};
pub use format::{parse_target, StatFormat};
