//! Instance records as returned by the directory service.
//!
//! These are read-only inputs: the inventory never mutates or validates them.
//! Field names follow the compute API's server listing, and every field is
//! lenient (missing or `null` values fall back to their default).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::HostKey;

/// Attached volumes keyed by slot index (`"0"`, `"1"`, ...).
///
/// Ordered by key so the encoded form is deterministic.
pub type VolumeSet = BTreeMap<String, Volume>;

/// One cloud compute instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceRecord {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commercial_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_date: String,
    #[serde(rename = "dns_private", deserialize_with = "null_as_default")]
    pub private_dns: String,
    #[serde(rename = "dns_public", deserialize_with = "null_as_default")]
    pub public_dns: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private_ip: String,
    pub public_ip: Option<PublicAddress>,
    pub bootscript: Option<Bootscript>,
    pub image: Option<Image>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: VolumeSet,
}

impl InstanceRecord {
    /// The inventory join key (private address).
    pub fn host_key(&self) -> HostKey {
        HostKey::new(self.private_ip.as_str())
    }

    /// Public address, or the empty string when none is attached.
    pub fn public_address(&self) -> &str {
        self.public_ip.as_ref().map(|ip| ip.address.as_str()).unwrap_or_default()
    }

    pub fn bootscript_id(&self) -> &str {
        self.bootscript.as_ref().map(|b| b.identifier.as_str()).unwrap_or_default()
    }

    pub fn image_name(&self) -> &str {
        self.image.as_ref().map(|i| i.name.as_str()).unwrap_or_default()
    }
}

/// Public (routed) address attached to an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicAddress {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dynamic: bool,
}

/// Boot configuration used to start the instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bootscript {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

/// Disk image the instance was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Storage volume attached to an instance.
///
/// Empty fields are omitted when encoded, so the flattened `volumes`
/// attribute only carries what the API reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(rename = "id", deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub size: u64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub creation_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub modification_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub organization: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub volume_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub export_uri: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
