//! Slide navigation: current-slide state, nav dots and the scroll viewport

mod controller;
mod dots;
mod state;
mod viewport;

pub use controller::{NavKey, NavOutcome, NavigationController};
pub use dots::NavDots;
pub use state::NavigationState;
pub use viewport::Viewport;
