//! In-memory directory for tests/dev.

use scwinv_core::InstanceRecord;

use super::{DirectoryError, ServerDirectory, ServerListing};

/// Directory answering every call with the same fixed result.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    result: Result<Vec<InstanceRecord>, DirectoryError>,
}

impl InMemoryDirectory {
    pub fn new(records: Vec<InstanceRecord>) -> Self {
        Self { result: Ok(records) }
    }

    /// Directory whose every call fails with `err`.
    pub fn failing(err: DirectoryError) -> Self {
        Self { result: Err(err) }
    }

    /// Load records from a server listing body (`{"servers": [...]}`).
    pub fn from_listing_json(body: &str) -> Result<Self, DirectoryError> {
        Ok(Self::new(ServerListing::parse(body)?.servers))
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ServerDirectory for InMemoryDirectory {
    fn list_servers(&self) -> Result<Vec<InstanceRecord>, DirectoryError> {
        self.result.clone()
    }
}
