//! Hacker News API client for hnfeed.
//!
//! Fetches the newest-story ID list and individual items from the public
//! Firebase endpoint (or any server speaking the same JSON shape).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{ClientConfig, HackerNewsClient};
