//! Binary log segment selection.
//!
//! This module provides:
//! - The recursive, name- and time-filtered segment search
//! - The manifest writer recording which segments a run used

mod locator;
mod manifest;

// Re-export public API
pub use locator::{find_segments, is_segment_name, locate_segments, LogSegment};
pub use manifest::write_segment_list;
