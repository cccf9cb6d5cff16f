// Presentation layer - HTTP surface and page rendering
pub mod app_state;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod view;
