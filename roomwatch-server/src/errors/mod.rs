pub mod api;
pub mod broker;
pub mod device;
pub mod room;
pub mod storage;
pub mod user;
pub mod validation;

pub use api::ApiError;
pub use broker::BrokerError;
pub use device::DeviceError;
pub use room::RoomError;
pub use storage::StorageError;
pub use user::UserError;
pub use validation::ValidationError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_id) = match self {
            ApiError::ValidationError(e) => (e.status_code(), e.to_string(), None),
            ApiError::BrokerError(e) => (e.status_code(), e.to_string(), None),
            ApiError::DeviceError(e) => (e.status_code(), e.to_string(), None),
            ApiError::RoomError(e) => (e.status_code(), e.to_string(), None),
            ApiError::UserError(e) => (e.status_code(), e.to_string(), None),
            ApiError::StorageError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(error_id.to_string()),
                )
            }
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": error_message
        });

        // Only internal failures carry an id to correlate with the logs
        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        (status, Json(json!({ "error": error_obj }))).into_response()
    }
}
