mod base;
mod loader;

pub use base::*;
pub use loader::*;
