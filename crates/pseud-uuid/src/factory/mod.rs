mod config;
mod prefetch;
mod queue;
#[cfg(test)]
mod tests;

pub use config::*;
pub use prefetch::*;
pub use queue::*;
