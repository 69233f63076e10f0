//! HTTP surface of the note service.

mod error;
pub mod routes;

use serde::{Deserialize, Serialize};

pub use error::ApiError;
pub use routes::build_router;

/// Body of confirmation and error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    /// Id of the note a create request produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }
}
