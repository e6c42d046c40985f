use super::{BrokerError, DeviceError, RoomError, StorageError, UserError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Broker error: {0}")]
    BrokerError(#[from] BrokerError),

    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Room error: {0}")]
    RoomError(#[from] RoomError),

    #[error("User error: {0}")]
    UserError(#[from] UserError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}
