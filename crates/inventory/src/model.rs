//! In-memory inventory: per-host metadata plus tag-derived groups.

use std::collections::BTreeMap;

use serde::Serialize;

use scwinv_core::{GroupName, HostKey, InventoryResult};

use crate::document::InventoryDocument;

/// Namespace under which every host attribute is stored.
pub const NAMESPACE: &str = "scaleway";

/// Attribute name -> string value, for one host and one namespace.
pub type HostAttributes = BTreeMap<String, String>;

/// Hostvars metadata: host key -> namespace -> attributes.
///
/// Serializes as the bare host map; the document wraps it under
/// `_meta.hostvars`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hostvars {
    hosts: BTreeMap<HostKey, BTreeMap<String, HostAttributes>>,
}

impl Hostvars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes of `host` in the inventory namespace, created if absent.
    pub fn namespace_mut(&mut self, host: &HostKey) -> &mut HostAttributes {
        self.hosts
            .entry(host.clone())
            .or_default()
            .entry(NAMESPACE.to_string())
            .or_default()
    }

    /// Set (or overwrite) one attribute of `host`.
    pub fn set(&mut self, host: &HostKey, attribute: impl Into<String>, value: impl Into<String>) {
        self.namespace_mut(host).insert(attribute.into(), value.into());
    }

    /// Attributes of `host` in the inventory namespace.
    pub fn attributes(&self, host: &str) -> Option<&HostAttributes> {
        self.hosts.get(host).and_then(|namespaces| namespaces.get(NAMESPACE))
    }

    /// Single attribute lookup.
    pub fn attribute(&self, host: &str, attribute: &str) -> Option<&str> {
        self.attributes(host)
            .and_then(|attrs| attrs.get(attribute))
            .map(String::as_str)
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains_key(host)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &HostKey> {
        self.hosts.keys()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// A named collection of hosts.
///
/// `children` is reserved for hierarchical grouping and is never populated
/// by the builder, but it is always rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    hosts: Vec<HostKey>,
    children: Vec<GroupName>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hosts<I, H>(hosts: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HostKey>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            children: Vec::new(),
        }
    }

    /// Append a host; duplicates are kept.
    pub fn push_host(&mut self, host: HostKey) {
        self.hosts.push(host);
    }

    pub fn hosts(&self) -> &[HostKey] {
        &self.hosts
    }

    pub fn children(&self) -> &[GroupName] {
        &self.children
    }
}

/// The inventory value: hostvars metadata and groups.
///
/// Created empty, populated in a single pass, then rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    hostvars: Hostvars,
    groups: BTreeMap<GroupName, Group>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostvars(&self) -> &Hostvars {
        &self.hostvars
    }

    pub fn hostvars_mut(&mut self) -> &mut Hostvars {
        &mut self.hostvars
    }

    pub fn groups(&self) -> &BTreeMap<GroupName, Group> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group named `name`, created empty if absent.
    pub fn group_mut(&mut self, name: &str) -> &mut Group {
        self.groups.entry(GroupName::from(name)).or_default()
    }

    /// Insert (or replace) a whole group.
    pub fn insert_group(&mut self, name: impl Into<GroupName>, group: Group) {
        self.groups.insert(name.into(), group);
    }

    pub fn host_count(&self) -> usize {
        self.hostvars.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostvars.is_empty() && self.groups.is_empty()
    }

    /// Render the inventory as a compact JSON document.
    pub fn to_json(&self) -> InventoryResult<String> {
        InventoryDocument::assemble(self)?.to_json_string()
    }
}
