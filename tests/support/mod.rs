// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use assert_fs::prelude::*;
use serde_json::{Value, json};
use warp::Filter;
use warp::http::StatusCode;

/// Shared state of the mock document store: per-collection documents in
/// insertion order.
pub type Collections = Arc<Mutex<HashMap<String, Vec<(String, Value)>>>>;

pub fn new_collections() -> Collections {
    Arc::new(Mutex::new(HashMap::new()))
}

pub fn seed(collections: &Collections, collection: &str, id: &str, mut doc: Value) {
    if let Some(fields) = doc.as_object_mut() {
        fields.insert("id".to_string(), Value::String(id.to_string()));
    }
    let mut state = collections.lock().unwrap();
    state
        .entry(collection.to_string())
        .or_default()
        .push((id.to_string(), doc));
}

pub fn get_doc(collections: &Collections, collection: &str, id: &str) -> Option<Value> {
    let state = collections.lock().unwrap();
    state
        .get(collection)?
        .iter()
        .find(|(doc_id, _)| doc_id == id)
        .map(|(_, doc)| doc.clone())
}

pub fn all_docs(collections: &Collections, collection: &str) -> Vec<Value> {
    let state = collections.lock().unwrap();
    state
        .get(collection)
        .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
        .unwrap_or_default()
}

/// Serves the document-store REST surface on an ephemeral port.
pub fn start_mock_store(collections: Collections) -> SocketAddr {
    let list_state = collections.clone();
    let list_route = warp::path!("collections" / String)
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(move |name: String, query: HashMap<String, String>| {
            let state = list_state.lock().unwrap();
            let docs: Vec<Value> = state
                .get(&name)
                .map(|docs| {
                    docs.iter()
                        .filter(|(_, doc)| match (query.get("field"), query.get("value")) {
                            (Some(field), Some(value)) => field_matches(doc.get(field), value),
                            _ => true,
                        })
                        .map(|(_, doc)| doc.clone())
                        .collect()
                })
                .unwrap_or_default();
            warp::reply::json(&json!({ "documents": docs }))
        });

    let get_state = collections.clone();
    let get_route = warp::path!("collections" / String / String)
        .and(warp::get())
        .map(move |name: String, id: String| {
            let state = get_state.lock().unwrap();
            let found = state
                .get(&name)
                .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == &id))
                .map(|(_, doc)| doc.clone());
            match found {
                Some(doc) => warp::reply::with_status(warp::reply::json(&doc), StatusCode::OK),
                None => warp::reply::with_status(
                    warp::reply::json(&json!({ "error": "not found" })),
                    StatusCode::NOT_FOUND,
                ),
            }
        });

    let create_state = collections.clone();
    let create_route = warp::path!("collections" / String)
        .and(warp::post())
        .and(warp::body::json())
        .map(move |name: String, mut doc: Value| {
            let mut state = create_state.lock().unwrap();
            let docs = state.entry(name.clone()).or_default();
            let id = format!("{name}-{}", docs.len() + 1);
            if let Some(fields) = doc.as_object_mut() {
                fields.insert("id".to_string(), Value::String(id.clone()));
            }
            docs.push((id.clone(), doc));
            warp::reply::json(&json!({ "id": id }))
        });

    let patch_state = collections.clone();
    let patch_route = warp::path!("collections" / String / String)
        .and(warp::patch())
        .and(warp::body::json())
        .map(move |name: String, id: String, patch: Value| {
            let mut state = patch_state.lock().unwrap();
            let target = state
                .get_mut(&name)
                .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == &id));
            match (target, patch.as_object()) {
                (Some((_, doc)), Some(patch_fields)) => {
                    if let Some(fields) = doc.as_object_mut() {
                        for (key, value) in patch_fields {
                            fields.insert(key.clone(), value.clone());
                        }
                    }
                    warp::reply::with_status(warp::reply::json(&json!({})), StatusCode::OK)
                }
                _ => warp::reply::with_status(
                    warp::reply::json(&json!({ "error": "not found" })),
                    StatusCode::NOT_FOUND,
                ),
            }
        });

    let delete_state = collections.clone();
    let delete_route = warp::path!("collections" / String / String)
        .and(warp::delete())
        .map(move |name: String, id: String| {
            let mut state = delete_state.lock().unwrap();
            let removed = state.get_mut(&name).is_some_and(|docs| {
                let before = docs.len();
                docs.retain(|(doc_id, _)| doc_id != &id);
                docs.len() != before
            });
            if removed {
                warp::reply::with_status(warp::reply::json(&json!({})), StatusCode::OK)
            } else {
                warp::reply::with_status(
                    warp::reply::json(&json!({ "error": "not found" })),
                    StatusCode::NOT_FOUND,
                )
            }
        });

    let routes = create_route
        .or(patch_route)
        .or(delete_route)
        .or(get_route)
        .or(list_route);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn field_matches(field: Option<&Value>, value: &str) -> bool {
    match field {
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(value)),
        Some(Value::String(text)) => text == value,
        Some(other) => other.to_string() == value,
        None => false,
    }
}

/// Writes a store config pointing at the mock server and exports mock
/// credentials for the spawned binary.
pub fn write_store_config(addr: SocketAddr, role: &str) -> assert_fs::NamedTempFile {
    let config_yaml = format!("base_url: http://{addr}\nrole: {role}\n");
    let config_file = assert_fs::NamedTempFile::new("store_config.yaml").unwrap();
    config_file.write_str(&config_yaml).unwrap();

    unsafe {
        env::set_var("COCKPIT_USERNAME", "mockuser");
        env::set_var("COCKPIT_API_TOKEN", "mocktoken");
    }

    config_file
}
