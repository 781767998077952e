//! Command service - the five operations of the commands controller.
//!
//! One instance is built per request around a freshly opened context, so no
//! mutable state is shared between requests except through the store.
//!
//! Absent-resource codes differ per operation (404 on get, 400 on delete) and
//! update does not check that its target exists before committing.

use crate::domain::Command;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::CommandContext;

/// Request-scoped commands controller
pub struct CommandService {
    context: Box<dyn CommandContext>,
}

impl CommandService {
    /// Create a controller over one request's context
    pub fn new(context: Box<dyn CommandContext>) -> Self {
        Self { context }
    }

    /// Every stored command
    pub async fn list(&self) -> AppResult<Vec<Command>> {
        self.context.all().await
    }

    /// Command by id, or `NotFound`
    pub async fn get(&self, id: i32) -> AppResult<Command> {
        self.context.find(id).await?.ok_or_not_found()
    }

    /// Stage and commit a new command, returning it with its assigned id.
    ///
    /// Any id on the payload is ignored. A failed commit becomes `BadRequest`.
    pub async fn create(&mut self, payload: Command) -> AppResult<Command> {
        self.context.add(payload.unsaved());

        let outcome = match self.context.save().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Command could not be created");
                return Err(AppError::bad_request(match &e {
                    AppError::Constraint(detail) => detail.clone(),
                    _ => "Command could not be saved".to_string(),
                }));
            }
        };

        let command = outcome
            .inserted
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("Commit reported no inserted command"))?;

        tracing::info!(id = command.id, "Command created");
        Ok(command)
    }

    /// Overwrite the command at `id` with `payload`.
    ///
    /// Rejected with `BadRequest` before touching the store when the payload id
    /// differs. Store errors from the commit propagate unchanged.
    pub async fn update(&mut self, id: i32, payload: Command) -> AppResult<()> {
        if payload.id != id {
            return Err(AppError::bad_request(format!(
                "Payload id {} does not match target id {}",
                payload.id, id
            )));
        }

        self.context.update(payload);
        self.context.save().await?;

        tracing::info!(id, "Command updated");
        Ok(())
    }

    /// Remove the command at `id`, returning the removed row.
    ///
    /// An absent id is a `BadRequest`, not `NotFound`.
    pub async fn delete(&mut self, id: i32) -> AppResult<Command> {
        let command = self
            .context
            .find(id)
            .await?
            .ok_or_bad_request(format!("Command {} does not exist", id))?;

        self.context.remove(command.clone());
        self.context.save().await?;

        tracing::info!(id, "Command deleted");
        Ok(command)
    }
}
