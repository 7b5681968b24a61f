pub mod backend;
pub mod host;

pub use backend::*;
pub use host::*;
