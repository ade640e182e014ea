// Public library interface for sector-heatmap
// The viewer and the debug CLI build on these modules

pub mod app;
pub mod layout;
pub mod market;
pub mod render;
pub mod ui;
