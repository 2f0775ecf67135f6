mod nav_dots;
mod popup;
mod slide_view;
mod status_bar;

pub use nav_dots::NavDotsWidget;
pub use popup::PopupWidget;
pub use slide_view::{slide_lines, wrap_text, SlideContent, SlideViewWidget};
pub use status_bar::StatusBarWidget;
