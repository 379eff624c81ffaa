mod global;
mod lease;
mod seed_registry;

pub use global::*;
pub use lease::*;
pub use seed_registry::*;
