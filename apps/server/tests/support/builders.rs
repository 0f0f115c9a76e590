use axum::body::Bytes;
use serde_json::{json, Value};

pub mod constants {
    pub const RECORD_ID: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
    pub const MISSING_ID: &str = "2c5f39cb-3fb2-42e3-994f-1127e4ddb538";
}

pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// `{ "metadata": ... }`
pub fn payload(metadata: Value) -> Value {
    json!({ "metadata": metadata })
}

/// `{ "id": ..., "metadata": ... }`
pub fn payload_with_id(id: &str, metadata: Value) -> Value {
    json!({ "id": id, "metadata": metadata })
}

pub fn minimal_metadata() -> Value {
    json!({ "title": "The Epic of Gilgamesh" })
}
