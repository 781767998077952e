//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and schema bootstrap
//! - SeaORM entities
//! - Persistence contexts over the command table (database and in-memory)

pub mod context;
pub mod db;
pub mod entities;

pub use context::{
    Change, ChangeSet, CommandContext, ContextFactory, DatabaseContext, MemoryContext,
    MemoryStore, SaveOutcome,
};
pub use db::{Database, Migrator};

#[cfg(any(test, feature = "test-utils"))]
pub use context::MockCommandContext;
