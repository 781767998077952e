//! Domain layer - Core business entities
//!
//! This module contains the domain model that represents
//! business concepts independent of infrastructure concerns.

pub mod command;

pub use command::Command;
