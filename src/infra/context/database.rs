//! SeaORM-backed command context.
//!
//! Reads use the pooled connection. `save` applies the staged changes inside
//! one transaction and rolls back on the first failure.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};

use super::{Change, ChangeSet, CommandContext, ContextFactory, SaveOutcome};
use crate::domain::Command;
use crate::errors::{AppError, AppResult};
use crate::infra::db::Database;
use crate::infra::entities::command::{self, ActiveModel, Entity as CommandEntity};

#[async_trait]
impl ContextFactory for Database {
    fn open(&self) -> Box<dyn CommandContext> {
        Box::new(DatabaseContext::new(self.get_connection()))
    }

    async fn ping(&self) -> AppResult<()> {
        Database::ping(self).await.map_err(AppError::from)
    }
}

/// Context over a SeaORM connection
pub struct DatabaseContext {
    db: DatabaseConnection,
    changes: ChangeSet,
}

impl DatabaseContext {
    /// Create a context with an empty change set
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            changes: ChangeSet::default(),
        }
    }

    async fn apply(
        txn: &DatabaseTransaction,
        change: Change,
        outcome: &mut SaveOutcome,
    ) -> Result<(), DbErr> {
        match change {
            Change::Added(command) => {
                let model = ActiveModel::for_insert(command).insert(txn).await?;
                outcome.inserted.push(Command::from(model));
            }
            Change::Modified(command) => {
                // Errors with RecordNotUpdated when no row has this id
                ActiveModel::for_replace(command).update(txn).await?;
            }
            Change::Deleted(command) => {
                let result = CommandEntity::delete_by_id(command.id).exec(txn).await?;
                if result.rows_affected == 0 {
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

#[async_trait]
impl CommandContext for DatabaseContext {
    async fn all(&self) -> AppResult<Vec<Command>> {
        let models = CommandEntity::find()
            .order_by_asc(command::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Command::from).collect())
    }

    async fn find(&self, id: i32) -> AppResult<Option<Command>> {
        let result = CommandEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Command::from))
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
        if changes.is_empty() {
            return Ok(SaveOutcome::default());
        }

        let txn = self.db.begin().await.map_err(AppError::from)?;
        let mut outcome = SaveOutcome::default();

        for change in changes {
            if let Err(e) = Self::apply(&txn, change, &mut outcome).await {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                return Err(AppError::from(e));
            }
        }

        txn.commit().await.map_err(AppError::from)?;
        tracing::debug!(rows_affected = outcome.rows_affected, "Database commit applied");
        Ok(outcome)
    }
}
