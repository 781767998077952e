//! HTTP request handlers.

pub mod command_handler;

pub use command_handler::command_routes;
