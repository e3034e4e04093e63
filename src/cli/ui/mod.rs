pub mod banner;
pub mod navigation;
pub mod table_renderer;
pub mod table_view;
