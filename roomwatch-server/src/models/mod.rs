mod collection;

pub use collection::Collection;
pub use roomwatch_api::models::*;
