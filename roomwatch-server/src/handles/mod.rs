mod broker_handle;
mod device_handle;
mod room_handle;
mod user_handle;

pub use broker_handle::*;
pub use device_handle::*;
pub use room_handle::*;
pub use user_handle::*;
