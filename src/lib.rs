// Library interface for testing
pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod time;
pub mod ui;
pub mod view;
