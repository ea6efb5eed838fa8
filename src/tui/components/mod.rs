// Components module - reusable UI building blocks
//
// Rail controls (picker, stepper, toggle, button) share a shape: a small
// bordered box that knows its own frame, focus mark, and editing state.
// The chart and status bar render the data half of the screen.
//
// Each component is a focused, single-responsibility module.

pub mod button;
pub mod chart;
pub mod picker;
pub mod status_bar;
pub mod stepper;
pub mod toggle;
