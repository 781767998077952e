//! Command domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// A recorded how-to: what it does, where it runs, and the line to type.
///
/// `id` is assigned by the store on commit and never reused. It is optional
/// on input and defaults to `0`, which no stored row ever carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Store-assigned primary key
    #[serde(default, alias = "Id")]
    #[schema(example = 1)]
    pub id: i32,
    /// What the command accomplishes
    #[serde(alias = "HowTo")]
    #[schema(example = "Run unit tests")]
    pub how_to: String,
    /// Platform the command runs on (at most 8 characters)
    #[serde(alias = "Platform")]
    #[validate(length(max = 8, message = "Platform must be at most 8 characters"))]
    #[schema(example = "dotnet", max_length = 8)]
    pub platform: String,
    /// The command line itself
    #[serde(alias = "CommandLine")]
    #[schema(example = "dotnet test")]
    pub command_line: String,
}

impl Command {
    /// Create an unsaved command (id unset)
    pub fn new(
        how_to: impl Into<String>,
        platform: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            how_to: how_to.into(),
            platform: platform.into(),
            command_line: command_line.into(),
        }
    }

    /// Copy of this command with the id cleared, ready to be staged as new
    pub fn unsaved(self) -> Self {
        Self { id: 0, ..self }
    }

    /// Check the column constraints a store enforces on commit.
    pub fn check_constraints(&self) -> AppResult<()> {
        self.validate().map_err(|errors| {
            let detail = errors
                .field_errors()
                .iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field))
                    })
                })
                .collect::<Vec<_>>()
                .join(", ");
            AppError::constraint(detail)
        })
    }
}
