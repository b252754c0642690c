pub mod disk_cache;
pub mod error;
