pub mod app;
pub mod detail;
pub mod grid_panel;
pub mod keyboard;
pub mod session_io;
pub mod settings;
pub mod settings_io;
pub mod toolbar;
