//! Custom extractors for request handling.

mod id_params;
mod json_payload;
mod scoped_service;

pub use id_params::{PathParam, QueryParam};
pub use json_payload::JsonPayload;
