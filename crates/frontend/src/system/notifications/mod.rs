pub mod api;
pub mod center;
pub mod ui;
