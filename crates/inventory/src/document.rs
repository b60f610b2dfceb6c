//! Inventory serializer.
//!
//! The output merges two independently keyed collections into one flat JSON
//! object:
//!
//! ```text
//! {
//!   "_meta": { "hostvars": { "<privateip>": { "scaleway": { ... } } } },
//!   "<tag>": { "hosts": ["<privateip>", ...], "children": [] },
//!   ...
//! }
//! ```
//!
//! The document is first assembled as an ordered association list, then
//! encoded. A group literally named `_meta` replaces the metadata entry.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use scwinv_core::InventoryResult;

use crate::model::{Hostvars, Inventory};

/// Top-level key holding the hostvars block.
pub const META_KEY: &str = "_meta";

#[derive(serde::Serialize)]
struct Meta<'a> {
    hostvars: &'a Hostvars,
}

/// Assembled inventory document, ready to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDocument {
    entries: Vec<(String, JsonValue)>,
}

impl InventoryDocument {
    /// Collect `_meta` plus one entry per group.
    pub fn assemble(inventory: &Inventory) -> InventoryResult<Self> {
        let mut entries = Vec::with_capacity(1 + inventory.group_count());
        entries.push((
            META_KEY.to_string(),
            serde_json::to_value(Meta {
                hostvars: inventory.hostvars(),
            })?,
        ));

        for (name, group) in inventory.groups() {
            let value = serde_json::to_value(group)?;
            if name.as_str() == META_KEY {
                tracing::warn!(group = META_KEY, "group name collides with the metadata key; hostvars are dropped");
                entries[0].1 = value;
                continue;
            }
            entries.push((name.to_string(), value));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, JsonValue)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_string(&self) -> InventoryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> InventoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> InventoryResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for InventoryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Group;
    use scwinv_core::HostKey;
    use serde_json::json;

    fn web_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.insert_group("web", Group::with_hosts(["10.0.0.1"]));
        inventory
            .hostvars_mut()
            .set(&HostKey::from("10.0.0.1"), "name", "srv1");
        inventory
    }

    #[test]
    fn renders_meta_and_groups_at_the_same_level() {
        let value = InventoryDocument::assemble(&web_inventory()).unwrap().to_value().unwrap();

        assert_eq!(
            value,
            json!({
                "_meta": { "hostvars": { "10.0.0.1": { "scaleway": { "name": "srv1" } } } },
                "web": { "hosts": ["10.0.0.1"], "children": [] }
            })
        );
    }

    #[test]
    fn empty_inventory_renders_empty_hostvars() {
        let json = Inventory::new().to_json().unwrap();
        assert_eq!(json, r#"{"_meta":{"hostvars":{}}}"#);
    }

    #[test]
    fn children_key_is_always_present() {
        let doc = InventoryDocument::assemble(&web_inventory()).unwrap();
        let web = doc.get("web").unwrap();
        assert_eq!(web.get("children"), Some(&json!([])));
    }

    #[test]
    fn serializing_twice_yields_equal_documents() {
        let inventory = web_inventory();
        let first: JsonValue = serde_json::from_str(&inventory.to_json().unwrap()).unwrap();
        let second: JsonValue = serde_json::from_str(&inventory.to_json().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn meta_comes_first_in_assembly_order() {
        let mut inventory = web_inventory();
        inventory.insert_group("api", Group::new());

        let doc = InventoryDocument::assemble(&inventory).unwrap();
        let keys: Vec<&str> = doc.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["_meta", "api", "web"]);
    }

    #[test]
    fn group_named_meta_overwrites_hostvars() {
        let mut inventory = web_inventory();
        inventory.insert_group(META_KEY, Group::with_hosts(["10.0.0.1"]));

        let doc = InventoryDocument::assemble(&inventory).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.get(META_KEY),
            Some(&json!({ "hosts": ["10.0.0.1"], "children": [] }))
        );
    }

    #[test]
    fn pretty_output_parses_to_same_value() {
        let doc = InventoryDocument::assemble(&web_inventory()).unwrap();
        let pretty: JsonValue = serde_json::from_str(&doc.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(pretty, doc.to_value().unwrap());
    }
}
