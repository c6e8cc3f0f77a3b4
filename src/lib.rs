pub(crate) mod services;
pub mod observability;

pub use services::burrito::*;
pub use observability::init_default_tracing;
