use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User {0} not found")]
    UserNotFound(String),
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::UserNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}
