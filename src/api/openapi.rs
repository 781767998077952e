//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::command_handler;
use crate::domain::Command;

/// OpenAPI documentation for the Command API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Command API",
        version = "0.1.0",
        description = "CRUD API for command-line how-tos, backed by SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        command_handler::list_commands,
        command_handler::get_command,
        command_handler::create_command,
        command_handler::update_command,
        command_handler::update_command_by_param,
        command_handler::delete_command,
        command_handler::delete_command_by_param,
    ),
    components(
        schemas(Command)
    ),
    tags(
        (name = "Commands", description = "Command management operations")
    )
)]
pub struct ApiDoc;
