use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Device {0} not found")]
    DeviceNotFound(String),
}

impl DeviceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeviceError::DeviceNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}
