//! Command implementations

mod verify;
mod version;

pub use verify::verify;
pub use version::version;
