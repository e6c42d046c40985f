mod broker;
mod device;
mod room;
mod user;

pub use broker::*;
pub use device::*;
pub use room::*;
pub use user::*;
