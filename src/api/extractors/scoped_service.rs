//! Request-scoped command service.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::AppState;
use crate::services::CommandService;

/// Each request gets a service over a freshly opened context.
#[async_trait]
impl FromRequestParts<AppState> for CommandService {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CommandService::new(state.store.open()))
    }
}
