//! Directory service boundary.
//!
//! The directory supplies the full list of instance records in one
//! synchronous call, or fails as a whole. Pagination and authentication stay
//! inside the adapters.

pub mod in_memory;
pub mod scaleway;

pub use in_memory::InMemoryDirectory;
pub use scaleway::ScalewayDirectory;

use serde::Deserialize;
use thiserror::Error;

use scwinv_core::{InstanceRecord, InventoryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("invalid server listing: {0}")]
    Decode(String),
}

impl From<DirectoryError> for InventoryError {
    fn from(err: DirectoryError) -> Self {
        InventoryError::fetch(err.to_string())
    }
}

/// Source of instance records.
pub trait ServerDirectory {
    /// Every server visible with the current credentials.
    ///
    /// Either the whole sequence or an error; never a partial list.
    fn list_servers(&self) -> Result<Vec<InstanceRecord>, DirectoryError>;
}

impl<D: ServerDirectory + ?Sized> ServerDirectory for &D {
    fn list_servers(&self) -> Result<Vec<InstanceRecord>, DirectoryError> {
        (**self).list_servers()
    }
}

impl<D: ServerDirectory + ?Sized> ServerDirectory for Box<D> {
    fn list_servers(&self) -> Result<Vec<InstanceRecord>, DirectoryError> {
        (**self).list_servers()
    }
}

/// One page of the compute API's server listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServerListing {
    #[serde(default)]
    pub servers: Vec<InstanceRecord>,
}

impl ServerListing {
    pub(crate) fn parse(body: &str) -> Result<Self, DirectoryError> {
        serde_json::from_str(body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}
