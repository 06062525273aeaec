//! Opaque string key/value persistence used by the paid overlay.

pub mod json_backend;
pub mod memory;

use crate::errors::BundulError;

pub type Result<T> = std::result::Result<T, BundulError>;

/// Abstraction over persistence backends that hold string values under string keys.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
