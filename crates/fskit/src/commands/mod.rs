//! Command implementations

pub mod log;
pub mod rmdir;
pub mod search;
pub mod walk;
