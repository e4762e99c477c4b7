//! Process-wide setup performed before the pipeline runs.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
