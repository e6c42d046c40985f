use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request: '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::MissingField(_) => StatusCode::BAD_REQUEST,
            ValidationError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text())
    }
}
