#![doc = include_str!("../README.md")]

mod error;
mod factory;
mod id;
mod mutex;
mod rand;
mod registry;

pub use crate::error::*;
pub use crate::factory::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::registry::*;
// Public re-export so downstream crates can reach `uuid` via
// `pseud_uuid::uuid`
pub use uuid;
