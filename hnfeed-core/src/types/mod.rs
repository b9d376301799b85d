//! Domain types for hnfeed.
//!
//! - [`Story`]: a single upstream item
//! - [`CachedValue`]: what the shared cache stores
//! - [`PageRequest`] / [`Page`]: clamped pagination input and the page envelope

mod story;
mod page;

pub use story::*;
pub use page::*;
