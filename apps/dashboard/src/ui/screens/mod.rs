pub mod dashboard;
pub mod overlays;
