//! # hnfeed Core
//!
//! Core types, errors, and traits for the hnfeed newest-stories service.
//!
//! This crate provides the building blocks shared by every other hnfeed crate:
//!
//! - **Types**: [`Story`], the cached value envelope, and pagination types
//! - **Errors**: [`FeedError`] and the crate-wide [`Result`] alias
//! - **Constants**: upstream URL, cache keys, TTL and paging limits
//! - **Traits**: the upstream, cache, and feed seams used for substitution in tests
//!
//! ## Example
//!
//! ```rust
//! use hnfeed_core::{PageRequest, Story};
//!
//! let page = PageRequest::clamped(Some(0), Some(100));
//! assert_eq!(page.page_number, 1);
//! assert_eq!(page.page_size, 50);
//!
//! let story = Story::new(1, "Rust guide");
//! assert!(story.matches("RUST"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FeedError, Result};
pub use traits::*;
pub use types::*;
