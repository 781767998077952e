//! Command API - CRUD service for command-line how-tos
//!
//! Stores commands (a how-to, the platform it runs on, and the command line)
//! in a single table and exposes list, get, create, update and delete over
//! HTTP with Axum and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: The `Command` entity
//! - **services**: The commands controller
//! - **infra**: Persistence contexts (database and in-memory)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against PostgreSQL
//! cargo run -- serve
//!
//! # Start the server with a throwaway in-memory store
//! cargo run -- serve --store memory
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::Command;
pub use errors::{AppError, AppResult};
pub use infra::{CommandContext, ContextFactory, Database, MemoryStore};
pub use services::CommandService;
