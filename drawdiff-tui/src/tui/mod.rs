pub mod app;
pub mod events;
pub mod scene_widget;
pub mod theme;
pub mod tooltip;
pub mod ui;
