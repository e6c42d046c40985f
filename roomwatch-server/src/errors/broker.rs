use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Broker not configured")]
    BrokerNotConfigured,
}

impl BrokerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::BrokerNotConfigured => StatusCode::NOT_FOUND,
        }
    }
}
