//! `scwinv-core` — inventory foundation building blocks.
//!
//! This crate contains **pure** primitives (no IO): host/group identifiers,
//! the instance record model read from the directory service, and the error
//! taxonomy shared by every layer.

pub mod error;
pub mod id;
pub mod record;

pub use error::{InventoryError, InventoryResult};
pub use id::{GroupName, HostKey};
pub use record::{Bootscript, Image, InstanceRecord, PublicAddress, Volume, VolumeSet};
