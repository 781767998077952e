//! Command database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use crate::domain::Command;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "commands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Command {
    fn from(model: Model) -> Self {
        Command {
            id: model.id,
            how_to: model.how_to,
            platform: model.platform,
            command_line: model.command_line,
        }
    }
}

impl ActiveModel {
    /// Insert form: the database assigns the id
    pub fn for_insert(command: Command) -> Self {
        Self {
            id: NotSet,
            how_to: Set(command.how_to),
            platform: Set(command.platform),
            command_line: Set(command.command_line),
        }
    }

    /// Full-replace form: every column but the key is written
    pub fn for_replace(command: Command) -> Self {
        Self {
            id: Unchanged(command.id),
            how_to: Set(command.how_to),
            platform: Set(command.platform),
            command_line: Set(command.command_line),
        }
    }
}
