//! Persistence context - staged changes over the command table.
//!
//! A context is opened per request by a [`ContextFactory`]. Reads go straight
//! to the store; `add`, `update` and `remove` only stage a [`Change`], and
//! nothing reaches the store until [`CommandContext::save`] commits the whole
//! change set at once.

use async_trait::async_trait;

use crate::domain::Command;
use crate::errors::AppResult;

mod database;
mod memory;

pub use database::DatabaseContext;
pub use memory::{MemoryContext, MemoryStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Request-scoped view over stored commands with deferred commit.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommandContext: Send + Sync {
    /// All committed rows in ascending id order
    async fn all(&self) -> AppResult<Vec<Command>>;

    /// Committed row by primary key
    async fn find(&self, id: i32) -> AppResult<Option<Command>>;

    /// Stage a new row; its id is assigned on commit
    fn add(&mut self, command: Command);

    /// Stage a full replacement of the row with `command.id`
    fn update(&mut self, command: Command);

    /// Stage deletion of an existing row
    fn remove(&mut self, command: Command);

    /// Number of staged, uncommitted changes
    fn pending(&self) -> usize;

    /// Commit every staged change atomically.
    ///
    /// The staged set is cleared whether or not the commit succeeds.
    async fn save(&mut self) -> AppResult<SaveOutcome>;
}

/// Opens request-scoped contexts over one backing store.
#[async_trait]
pub trait ContextFactory: Send + Sync {
    /// Open a fresh context with an empty change set
    fn open(&self) -> Box<dyn CommandContext>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// A staged change, applied on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(Command),
    Modified(Command),
    Deleted(Command),
}

impl Change {
    /// Row constraints only apply to rows being written
    fn check_constraints(&self) -> AppResult<()> {
        match self {
            Change::Added(command) | Change::Modified(command) => command.check_constraints(),
            Change::Deleted(_) => Ok(()),
        }
    }
}

/// Ordered set of staged changes
#[derive(Debug, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drain the staged changes, checking row constraints first.
    ///
    /// The set is empty afterwards even when a constraint fails.
    pub fn take_checked(&mut self) -> AppResult<Vec<Change>> {
        let changes = std::mem::take(&mut self.changes);
        for change in &changes {
            change.check_constraints()?;
        }
        Ok(changes)
    }
}

/// Result of a successful commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Rows inserted by this commit, with their assigned ids, in staging order
    pub inserted: Vec<Command>,
    /// Total rows written or deleted
    pub rows_affected: u64,
}
