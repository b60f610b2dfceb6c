//! Infrastructure layer: configuration and the directory service boundary.

pub mod config;
pub mod directory;

pub use config::InventoryConfig;
pub use directory::{DirectoryError, InMemoryDirectory, ScalewayDirectory, ServerDirectory};
