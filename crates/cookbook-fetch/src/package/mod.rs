//! Cookbook identity and location descriptors.

mod dependency;
mod location;

pub use dependency::Dependency;
pub use location::{LocationType, RemoteLocation};
