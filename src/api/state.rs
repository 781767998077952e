//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::ContextFactory;

/// Application state shared across handlers.
///
/// Holds the store; each request opens its own context from it.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for the command table
    pub store: Arc<dyn ContextFactory>,
}

impl AppState {
    /// Create new application state over a store
    pub fn new(store: Arc<dyn ContextFactory>) -> Self {
        Self { store }
    }
}
