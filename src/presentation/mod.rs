// Presentation layer - HTTP state and handlers
pub mod app_state;
pub mod dto;
pub mod handlers;
