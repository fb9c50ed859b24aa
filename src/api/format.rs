//! Public wire format for the REST adapter.
//!
//! Resources are serialized as `{ id, type, attributes, links }`. Self links
//! are built from the configured REST base URL, never from the inbound
//! request, so responses stay stable behind proxies.

use serde_json::{json, Map, Value};

/// Convert a raw database row into the public resource format
/// { id, type, attributes, links }
pub fn resource_to_api_value(row: &Map<String, Value>, resource_type: &str, base_url: &str) -> Value {
    let id = row_id(row);

    // Build attributes from the row, excluding the id
    let mut attributes = Map::new();
    for (key, value) in row {
        if key != "id" {
            attributes.insert(key.clone(), value.clone());
        }
    }

    let mut obj = Map::new();
    if let Some(id) = &id {
        obj.insert("id".into(), Value::String(id.clone()));
    }
    obj.insert("type".into(), Value::String(resource_type.to_string()));
    obj.insert("attributes".into(), Value::Object(attributes));
    if let Some(id) = &id {
        obj.insert(
            "links".into(),
            json!({ "self": format!("{}/{}/{}", trimmed(base_url), resource_type, id) }),
        );
    }

    Value::Object(obj)
}

/// Convert a list of rows into a resource collection with a self link
pub fn collection_to_api_value(
    rows: &[Map<String, Value>],
    resource_type: &str,
    base_url: &str,
) -> Value {
    let items: Vec<Value> =
        rows.iter().map(|row| resource_to_api_value(row, resource_type, base_url)).collect();

    json!({
        "items": items,
        "links": { "self": format!("{}/{}", trimmed(base_url), resource_type) }
    })
}

fn trimmed(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Textual id of a row, whatever the underlying column type
fn row_id(row: &Map<String, Value>) -> Option<String> {
    match row.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn resource_includes_self_link_from_base_url() {
        let value = resource_to_api_value(
            &row(json!({ "id": 7, "title": "hello" })),
            "posts",
            "http://localhost:3000/api/rest",
        );

        assert_eq!(value["id"], "7");
        assert_eq!(value["type"], "posts");
        assert_eq!(value["attributes"], json!({ "title": "hello" }));
        assert_eq!(value["links"]["self"], "http://localhost:3000/api/rest/posts/7");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let value = resource_to_api_value(
            &row(json!({ "id": "abc-123" })),
            "posts",
            "http://localhost:3000/api/rest/",
        );
        assert_eq!(value["links"]["self"], "http://localhost:3000/api/rest/posts/abc-123");
    }

    #[test]
    fn row_without_id_gets_no_links() {
        let value = resource_to_api_value(&row(json!({ "title": "x" })), "posts", "http://x");
        assert!(value.get("links").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn collection_carries_items_and_self_link() {
        let rows = vec![row(json!({ "id": 1 })), row(json!({ "id": 2 }))];
        let value = collection_to_api_value(&rows, "posts", "http://h/api/rest");
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["links"]["self"], "http://h/api/rest/posts");
        assert_eq!(value["items"][1]["links"]["self"], "http://h/api/rest/posts/2");
    }
}
