//! Inventory module.
//!
//! This crate turns instance records into an Ansible-style dynamic inventory
//! and renders it, implemented purely as deterministic logic (no IO, no HTTP).

pub mod builder;
pub mod document;
pub mod model;

pub use builder::{InventoryBuilder, VpnSequence, FIRST_VPN_SUFFIX};
pub use document::{InventoryDocument, META_KEY};
pub use model::{Group, HostAttributes, Hostvars, Inventory, NAMESPACE};
