//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod command;

pub use command::{ActiveModel as CommandActiveModel, Entity as CommandEntity, Model as CommandModel};
