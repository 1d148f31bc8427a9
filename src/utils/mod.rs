//! Utility modules for SKU image fetching
//!
//! - `files`: output naming and filesystem writes
//! - `http`: HTTP client and share-link handling
//! - `images`: the per-image download loop

pub mod files;
pub mod http;
pub mod images;
