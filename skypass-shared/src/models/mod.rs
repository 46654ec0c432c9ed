pub mod events;
pub mod navigation;
