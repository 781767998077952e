//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the `CommandContext` abstraction
//! so they can run over any store.

mod command_service;

pub use command_service::CommandService;
