pub mod input;
pub mod resize;
pub mod tooltip;
