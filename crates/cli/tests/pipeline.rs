use serde_json::{json, Value};

use scwinv_core::InventoryError;
use scwinv_infra::{DirectoryError, InMemoryDirectory};

const LISTING: &str = r#"{
  "servers": [
    {
      "id": "3f8a1c2e-0000-4000-8000-000000000001",
      "name": "web-1",
      "hostname": "web-1",
      "arch": "x86_64",
      "commercial_type": "VC1S",
      "creation_date": "2017-03-01T10:00:00.000000+00:00",
      "dns_private": "3f8a1c2e.priv.cloud.scaleway.com",
      "dns_public": "3f8a1c2e.pub.cloud.scaleway.com",
      "organization": "org-1",
      "state": "running",
      "private_ip": "10.1.0.1",
      "public_ip": { "id": "ip-1", "address": "51.15.0.1", "dynamic": false },
      "bootscript": { "id": "boot-1", "title": "x86_64 4.10" },
      "image": { "id": "img-1", "name": "Ubuntu Xenial" },
      "tags": ["web", "prod"],
      "volumes": { "0": { "id": "vol-1", "name": "root", "size": 50000000000, "volume_type": "l_ssd" } }
    },
    {
      "id": "3f8a1c2e-0000-4000-8000-000000000002",
      "name": "db-1",
      "hostname": "db-1",
      "arch": "x86_64",
      "commercial_type": "VC1M",
      "organization": "org-1",
      "state": "stopped",
      "private_ip": "10.1.0.2",
      "public_ip": null,
      "bootscript": null,
      "image": { "id": "img-2", "name": "Debian Jessie" },
      "tags": ["db", "prod"],
      "volumes": {}
    }
  ]
}"#;

fn render(directory: &InMemoryDirectory) -> Value {
    let document = scwinv_cli::run(directory).unwrap();
    serde_json::from_str(&document).unwrap()
}

#[test]
fn renders_groups_and_hostvars_side_by_side() {
    let directory = InMemoryDirectory::from_listing_json(LISTING).unwrap();
    let doc = render(&directory);

    let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["_meta", "web", "prod", "db"] {
        assert!(keys.contains(&key), "missing top-level key {key}");
    }

    assert_eq!(doc["web"], json!({ "hosts": ["10.1.0.1"], "children": [] }));
    assert_eq!(doc["db"], json!({ "hosts": ["10.1.0.2"], "children": [] }));
    assert_eq!(doc["prod"], json!({ "hosts": ["10.1.0.1", "10.1.0.2"], "children": [] }));
}

#[test]
fn hostvars_carry_projected_attributes() {
    let directory = InMemoryDirectory::from_listing_json(LISTING).unwrap();
    let doc = render(&directory);

    let web = &doc["_meta"]["hostvars"]["10.1.0.1"]["scaleway"];
    assert_eq!(web["publicip"], "51.15.0.1");
    assert_eq!(web["bootscript"], "boot-1");
    assert_eq!(web["image"], "Ubuntu Xenial");
    assert_eq!(web["tags"], "[web,prod]");
    assert_eq!(web["volumes"], "{0:{id:vol-1,size:50000000000,name:root,volume_type:l_ssd}}");
    assert_eq!(web["vpn_ip"], "192.168.0.11");

    let db = &doc["_meta"]["hostvars"]["10.1.0.2"]["scaleway"];
    assert_eq!(db["publicip"], "");
    assert_eq!(db["bootscript"], "");
    assert_eq!(db["state"], "stopped");
    assert_eq!(db["volumes"], "{}");
    assert_eq!(db["vpn_ip"], "192.168.0.12");
}

#[test]
fn every_grouped_host_has_hostvars() {
    let directory = InMemoryDirectory::from_listing_json(LISTING).unwrap();
    let doc = render(&directory);
    let hostvars = doc["_meta"]["hostvars"].as_object().unwrap();

    for (name, group) in doc.as_object().unwrap() {
        if name == "_meta" {
            continue;
        }
        for host in group["hosts"].as_array().unwrap() {
            assert!(hostvars.contains_key(host.as_str().unwrap()), "{host} in {name} lacks hostvars");
        }
    }
}

#[test]
fn no_servers_yields_empty_document() {
    let document = scwinv_cli::run(&InMemoryDirectory::default()).unwrap();
    assert_eq!(document, r#"{"_meta":{"hostvars":{}}}"#);
}

#[test]
fn fetch_failure_is_distinct_from_empty_result() {
    let directory = InMemoryDirectory::failing(DirectoryError::Api {
        status: 403,
        body: "forbidden".to_string(),
    });

    match scwinv_cli::run(&directory).unwrap_err() {
        InventoryError::Fetch(msg) => assert!(msg.contains("403")),
        other => panic!("Expected Fetch error, got {other:?}"),
    }
}

#[test]
fn runs_are_reproducible() {
    let directory = InMemoryDirectory::from_listing_json(LISTING).unwrap();
    assert_eq!(scwinv_cli::run(&directory).unwrap(), scwinv_cli::run(&directory).unwrap());
}
