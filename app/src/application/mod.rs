pub mod navigation;
pub mod views;
