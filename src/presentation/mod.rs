// Presentation layer - HTTP surface for renderers
pub mod app_state;
pub mod handlers;
