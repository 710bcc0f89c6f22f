//! Cookbook sources probed by the dispatcher.

mod inline;
mod traits;
mod universe;

pub use inline::InlineSource;
pub use traits::Source;
pub use universe::{Universe, UniverseEntry, UniverseSource};
