//! In-memory command store.
//!
//! One shared table per [`MemoryStore`]; every context opened from it sees the
//! same committed rows but stages its own changes.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::{Change, ChangeSet, CommandContext, ContextFactory, SaveOutcome};
use crate::domain::Command;
use crate::errors::AppResult;

#[derive(Debug, Clone)]
struct Table {
    rows: BTreeMap<i32, Command>,
    next_id: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Table {
    /// Apply one change, mirroring the errors a relational store reports.
    fn apply(&mut self, change: Change, outcome: &mut SaveOutcome) -> Result<(), DbErr> {
        match change {
            Change::Added(command) => {
                let id = self.next_id;
                self.next_id += 1;
                let row = Command { id, ..command };
                self.rows.insert(id, row.clone());
                outcome.inserted.push(row);
            }
            Change::Modified(command) => match self.rows.get_mut(&command.id) {
                Some(row) => *row = command,
                None => return Err(DbErr::RecordNotUpdated),
            },
            Change::Deleted(command) => {
                if self.rows.remove(&command.id).is_none() {
                    return Err(DbErr::RecordNotFound(format!(
                        "command {} does not exist",
                        command.id
                    )));
                }
            }
        }
        outcome.rows_affected += 1;
        Ok(())
    }
}

/// Process-local command table shared by all contexts opened from it.
#[derive(Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    /// Create an empty store; ids start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed rows
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether the store holds no committed rows
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    /// Open a concretely-typed context
    pub fn context(&self) -> MemoryContext {
        MemoryContext {
            table: self.table.clone(),
            changes: ChangeSet::default(),
        }
    }
}

#[async_trait]
impl ContextFactory for MemoryStore {
    fn open(&self) -> Box<dyn CommandContext> {
        Box::new(self.context())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Context over a [`MemoryStore`]
pub struct MemoryContext {
    table: Arc<RwLock<Table>>,
    changes: ChangeSet,
}

#[async_trait]
impl CommandContext for MemoryContext {
    async fn all(&self) -> AppResult<Vec<Command>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> AppResult<Option<Command>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    fn add(&mut self, command: Command) {
        self.changes.push(Change::Added(command));
    }

    fn update(&mut self, command: Command) {
        self.changes.push(Change::Modified(command));
    }

    fn remove(&mut self, command: Command) {
        self.changes.push(Change::Deleted(command));
    }

    fn pending(&self) -> usize {
        self.changes.len()
    }

    async fn save(&mut self) -> AppResult<SaveOutcome> {
        let changes = self.changes.take_checked()?;

        let mut table = self.table.write().await;
        // Work on a copy so a failing change leaves the table untouched
        let mut working = table.clone();
        let mut outcome = SaveOutcome::default();
        for change in changes {
            working.apply(change, &mut outcome)?;
        }
        *table = working;

        tracing::debug!(rows_affected = outcome.rows_affected, "In-memory commit applied");
        Ok(outcome)
    }
}
