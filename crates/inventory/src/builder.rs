//! Inventory builder: instance records -> hostvars + tag groups.
//!
//! Single pass over the input, in order. Every record:
//! - (re)writes its host's attributes in the `scaleway` namespace,
//! - receives the next positional `vpn_ip`,
//! - is appended to one group per tag it carries.
//!
//! No validation: empty or repeated private addresses are accepted as-is.

use std::borrow::Borrow;

use serde::Serialize;

use scwinv_core::InstanceRecord;

use crate::model::{HostAttributes, Inventory};

/// Suffix of the first `vpn_ip` handed out in a run.
pub const FIRST_VPN_SUFFIX: u32 = 11;

const VPN_PREFIX: &str = "192.168.0.";

/// Positional `vpn_ip` allocator.
///
/// Yields `192.168.0.<n>` with `n` increasing by one per record. The values
/// are placeholders and do not reflect any real VPN allocation. The counter
/// is 64-bit, so any `u32` starting suffix keeps counting without wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VpnSequence {
    next: u64,
    past_octet: bool,
}

impl VpnSequence {
    pub fn new() -> Self {
        Self::starting_at(FIRST_VPN_SUFFIX)
    }

    pub fn starting_at(suffix: u32) -> Self {
        Self {
            next: u64::from(suffix),
            past_octet: false,
        }
    }

    /// Suffix the next call to [`VpnSequence::next_address`] will use.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Whether an address with a suffix above 255 has been handed out.
    pub fn past_octet(&self) -> bool {
        self.past_octet
    }

    pub fn next_address(&mut self) -> String {
        let suffix = self.next;
        self.next += 1;

        if suffix > u64::from(u8::MAX) && !self.past_octet {
            self.past_octet = true;
            tracing::warn!(suffix, "vpn_ip suffix no longer fits in one octet; addresses are not valid IPv4");
        }

        format!("{VPN_PREFIX}{suffix}")
    }
}

impl Default for VpnSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds (or extends) an [`Inventory`] from instance records.
///
/// The `vpn_ip` counter lives in the builder, so one builder used across
/// several `extend` calls keeps numbering where it left off.
#[derive(Debug, Clone, Default)]
pub struct InventoryBuilder {
    vpn: VpnSequence,
    processed: usize,
}

impl InventoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_vpn_suffix(suffix: u32) -> Self {
        Self {
            vpn: VpnSequence::starting_at(suffix),
            processed: 0,
        }
    }

    /// Number of records processed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn vpn_sequence(&self) -> VpnSequence {
        self.vpn
    }

    /// Build a fresh inventory from `records`.
    pub fn build<I>(&mut self, records: I) -> Inventory
    where
        I: IntoIterator,
        I::Item: Borrow<InstanceRecord>,
    {
        let mut inventory = Inventory::new();
        self.extend(&mut inventory, records);
        inventory
    }

    /// Populate an existing (possibly non-empty) inventory.
    pub fn extend<I>(&mut self, inventory: &mut Inventory, records: I)
    where
        I: IntoIterator,
        I::Item: Borrow<InstanceRecord>,
    {
        let before = self.processed;
        for record in records {
            self.add_record(inventory, record.borrow());
        }

        tracing::info!(
            records = self.processed - before,
            hosts = inventory.host_count(),
            groups = inventory.group_count(),
            "inventory built"
        );
    }

    /// Add a single record.
    pub fn add_record(&mut self, inventory: &mut Inventory, record: &InstanceRecord) {
        let host = record.host_key();

        if inventory.hostvars().contains(host.as_str()) {
            tracing::warn!(host = %host, "duplicate private address; overwriting host metadata");
        }

        let vpn_ip = self.vpn.next_address();
        self.processed += 1;

        tracing::debug!(host = %host, name = %record.name, tags = record.tags.len(), vpn_ip = %vpn_ip, "adding server");

        let attributes = inventory.hostvars_mut().namespace_mut(&host);
        attributes.insert("vpn_ip".to_string(), vpn_ip);
        project_attributes(record, attributes);

        for tag in &record.tags {
            inventory.group_mut(tag).push_host(host.clone());
        }
    }
}

fn project_attributes(record: &InstanceRecord, attributes: &mut HostAttributes) {
    let fields = [
        ("arch", record.arch.clone()),
        ("bootscript", record.bootscript_id().to_string()),
        ("commercialtype", record.commercial_type.clone()),
        ("creationdate", record.creation_date.clone()),
        ("privatedns", record.private_dns.clone()),
        ("publicdns", record.public_dns.clone()),
        ("hostname", record.hostname.clone()),
        ("identifier", record.identifier.clone()),
        ("image", record.image_name().to_string()),
        ("name", record.name.clone()),
        ("organization", record.organization.clone()),
        ("privateip", record.private_ip.clone()),
        ("publicip", record.public_address().to_string()),
        ("state", record.state.clone()),
        ("tags", flatten(&record.tags)),
        ("volumes", flatten(&record.volumes)),
    ];

    for (name, value) in fields {
        attributes.insert(name.to_string(), value);
    }
}

/// JSON-encode `value` and drop every `"` character.
///
/// Lossy: a quote inside a tag or volume field disappears too.
fn flatten<T: Serialize + ?Sized>(value: &T) -> String {
    // Only called with string sequences and string-keyed maps of plain
    // structs, which serde_json always encodes; the empty fallback is unreachable.
    serde_json::to_string(value)
        .map(|json| json.replace('"', ""))
        .unwrap_or_default()
}
