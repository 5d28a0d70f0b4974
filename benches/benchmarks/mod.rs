pub mod common;
pub mod gap;
pub mod summary;
