//! Smooth scrolling system
//!
//! ## Atoms
//! - `easing` - Pure easing functions (cubic, quartic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Configuration helpers (types live in `crate::config`)
//!
//! ## Molecules
//! - `animation` - Animation controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use slidedeck_core::scroll::{ScrollAnimator, ScrollConfig};
//!
//! let mut animator = ScrollAnimator::new(ScrollConfig::default());
//! animator.scroll_to(target, max_scroll, Instant::now());
//!
//! // In the main loop, update each frame and read the position
//! let scroll = animator.update(max_scroll, Instant::now());
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
