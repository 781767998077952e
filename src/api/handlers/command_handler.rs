//! Command handlers.

use axum::{
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{JsonPayload, PathParam, QueryParam};
use crate::api::AppState;
use crate::config::COMMANDS_BASE_PATH;
use crate::domain::Command;
use crate::errors::AppResult;
use crate::services::CommandService;
use crate::types::{CreatedAt, NoContent};

/// Target id passed as a query parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdParam {
    /// Command ID (0 when omitted)
    #[serde(default)]
    pub id: i32,
}

/// Create command routes
pub fn command_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_commands)
                .post(create_command)
                .put(update_command_by_param)
                .delete(delete_command_by_param),
        )
        .route(
            "/:id",
            get(get_command).put(update_command).delete(delete_command),
        )
}

/// List all commands
#[utoipa::path(
    get,
    path = "/api/commands",
    tag = "Commands",
    responses(
        (status = 200, description = "All stored commands", body = Vec<Command>)
    )
)]
pub async fn list_commands(service: CommandService) -> AppResult<Json<Vec<Command>>> {
    Ok(Json(service.list().await?))
}

/// Get command by ID
#[utoipa::path(
    get,
    path = "/api/commands/{id}",
    tag = "Commands",
    params(
        ("id" = i32, Path, description = "Command ID")
    ),
    responses(
        (status = 200, description = "Matching command", body = Command),
        (status = 404, description = "Command not found")
    )
)]
pub async fn get_command(
    service: CommandService,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Command>> {
    Ok(Json(service.get(id).await?))
}

/// Create a command
#[utoipa::path(
    post,
    path = "/api/commands",
    tag = "Commands",
    request_body = Command,
    responses(
        (status = 201, description = "Command created", body = Command,
            headers(("Location" = String, description = "URL of the new command"))),
        (status = 400, description = "Malformed body or commit rejected by the store")
    )
)]
pub async fn create_command(
    mut service: CommandService,
    JsonPayload(payload): JsonPayload<Command>,
) -> AppResult<CreatedAt<Command>> {
    let command = service.create(payload).await?;
    Ok(CreatedAt::new(
        format!("{}/{}", COMMANDS_BASE_PATH, command.id),
        command,
    ))
}

/// Replace a command, id from the path
#[utoipa::path(
    put,
    path = "/api/commands/{id}",
    tag = "Commands",
    params(
        ("id" = i32, Path, description = "Command ID")
    ),
    request_body = Command,
    responses(
        (status = 204, description = "Command replaced"),
        (status = 400, description = "Body id does not match target id"),
        (status = 500, description = "Store rejected the commit")
    )
)]
pub async fn update_command(
    mut service: CommandService,
    PathParam(id): PathParam<i32>,
    JsonPayload(payload): JsonPayload<Command>,
) -> AppResult<NoContent> {
    service.update(id, payload).await?;
    Ok(NoContent)
}

/// Replace a command, id from the query string
#[utoipa::path(
    put,
    path = "/api/commands",
    tag = "Commands",
    params(IdParam),
    request_body = Command,
    responses(
        (status = 204, description = "Command replaced"),
        (status = 400, description = "Body id does not match target id"),
        (status = 500, description = "Store rejected the commit")
    )
)]
pub async fn update_command_by_param(
    mut service: CommandService,
    QueryParam(param): QueryParam<IdParam>,
    JsonPayload(payload): JsonPayload<Command>,
) -> AppResult<NoContent> {
    service.update(param.id, payload).await?;
    Ok(NoContent)
}

/// Delete a command, id from the path
#[utoipa::path(
    delete,
    path = "/api/commands/{id}",
    tag = "Commands",
    params(
        ("id" = i32, Path, description = "Command ID")
    ),
    responses(
        (status = 200, description = "Command deleted", body = Command),
        (status = 400, description = "Command does not exist")
    )
)]
pub async fn delete_command(
    mut service: CommandService,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Command>> {
    Ok(Json(service.delete(id).await?))
}

/// Delete a command, id from the query string
#[utoipa::path(
    delete,
    path = "/api/commands",
    tag = "Commands",
    params(IdParam),
    responses(
        (status = 200, description = "Command deleted", body = Command),
        (status = 400, description = "Command does not exist")
    )
)]
pub async fn delete_command_by_param(
    mut service: CommandService,
    QueryParam(param): QueryParam<IdParam>,
) -> AppResult<Json<Command>> {
    Ok(Json(service.delete(param.id).await?))
}
