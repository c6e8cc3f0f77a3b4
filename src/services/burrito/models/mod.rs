pub mod base;
pub mod embedding;
pub mod errors;
pub mod install;
pub mod query;
pub mod transform;

pub use base::*;
pub use embedding::*;
pub use errors::*;
pub use install::*;
pub use query::*;
pub use transform::*;
