//! Common utilities for the Wombat SVG converter.
//!
//! This crate provides shared infrastructure used by all converter components:
//! - **Warning System** - deduplicated warnings for unsupported features
//! - **Reference Resolution** - splitting and joining `href` values
//! - **Data URLs** - decoding inline `data:` payloads

pub mod data_url;
pub mod url;
pub mod warning;
