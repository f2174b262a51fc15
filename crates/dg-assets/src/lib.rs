//! dg-assets: room template files and generator configs for dg-core.

pub mod mapping;
pub mod registry;

pub use mapping::*;
pub use registry::*;
