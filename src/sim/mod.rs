pub mod debug_view;
pub mod event;
pub mod history;
pub mod navigation;
