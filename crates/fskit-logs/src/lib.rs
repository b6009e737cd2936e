//! fskit Logs - Append-only logging with size-based rotation

mod rotation;
mod writer;

pub use fskit_core::LoggerOptions;
pub use rotation::{generations, rotate, rotated_path};
pub use writer::RotatingLogger;
