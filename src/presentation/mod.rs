// Presentation layer - HTTP handlers, sessions and HTML views
pub mod app_state;
pub mod handlers;
pub mod session_store;
pub mod views;
