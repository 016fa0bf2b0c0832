pub mod banner;
pub mod slide_detail;
pub mod slide_grid;
pub mod status_bar;
pub mod upload_panel;
