//! Infrastructure Layer

pub mod file;

pub use file::FileCacheStore;
