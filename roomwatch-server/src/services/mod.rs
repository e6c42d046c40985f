mod registry_service;
mod sweeper_service;
pub mod validation;

pub use registry_service::*;
pub use sweeper_service::*;
