//! Dynamic inventory pipeline: fetch servers, build the inventory, render it.

use scwinv_core::InventoryResult;
use scwinv_infra::{InventoryConfig, ScalewayDirectory, ServerDirectory};
use scwinv_inventory::InventoryBuilder;

/// Run one inventory pass against `directory` and return the JSON document.
///
/// Any failure aborts the pass; no partial document is produced.
pub fn run<D: ServerDirectory>(directory: &D) -> InventoryResult<String> {
    let records = directory.list_servers()?;
    tracing::debug!(records = records.len(), "servers fetched");

    let inventory = InventoryBuilder::new().build(&records);
    inventory.to_json()
}

/// Run one pass using settings from the process environment.
pub fn run_from_env() -> InventoryResult<String> {
    let config = InventoryConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let directory = ScalewayDirectory::new(config)?;
    run(&directory)
}
