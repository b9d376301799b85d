//! # hnfeed Service
//!
//! The newest-stories pipeline: fetch the ID list, resolve each item through
//! the cache, filter by search term, paginate, and count.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod service;

pub use service::{ServiceConfig, StoryService};
