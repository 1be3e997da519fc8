//! Conversion between plain JSON values and the typed value envelopes of the
//! Firestore REST API (`{"stringValue": "..."}`, `{"mapValue": {...}}`, ...).

use serde_json::{Map, Number, Value, json};

use business::domain::errors::RepositoryError;

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 travels as a decimal string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, RepositoryError> {
    fields
        .iter()
        .map(|(name, value)| decode_value(value).map(|decoded| (name.clone(), decoded)))
        .collect()
}

pub fn decode_value(value: &Value) -> Result<Value, RepositoryError> {
    let envelope = value
        .as_object()
        .filter(|o| o.len() == 1)
        .ok_or_else(|| RepositoryError::malformed_document(format!("not a typed value: {value}")))?;

    let Some((kind, inner)) = envelope.iter().next() else {
        return Err(RepositoryError::malformed_document("empty typed value"));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| mismatch(kind, inner)),
        "integerValue" => decode_integer(inner).ok_or_else(|| mismatch(kind, inner)),
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN and the infinities come back as strings
            Value::String(_) => Ok(inner.clone()),
            _ => Err(mismatch(kind, inner)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| mismatch(kind, inner)),
        "geoPointValue" => {
            let point = inner.as_object().ok_or_else(|| mismatch(kind, inner))?;
            let latitude = coordinate(point, "latitude").ok_or_else(|| mismatch(kind, inner))?;
            let longitude = coordinate(point, "longitude").ok_or_else(|| mismatch(kind, inner))?;
            Ok(json!({ "latitude": latitude, "longitude": longitude }))
        }
        "arrayValue" => match inner.get("values") {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(values)) => values
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Some(other) => Err(mismatch(kind, other)),
        },
        "mapValue" => match inner.get("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            Some(other) => Err(mismatch(kind, other)),
        },
        other => Err(RepositoryError::malformed_document(format!(
            "unsupported value type: {other}"
        ))),
    }
}

fn decode_integer(inner: &Value) -> Option<Value> {
    match inner {
        Value::String(s) => s.parse::<i64>().ok().map(|i| Value::Number(Number::from(i))),
        Value::Number(n) if n.is_i64() => Some(inner.clone()),
        _ => None,
    }
}

// Zero coordinates are omitted from the payload.
fn coordinate(point: &Map<String, Value>, name: &str) -> Option<Value> {
    match point.get(name) {
        None => Some(json!(0.0)),
        Some(Value::Number(n)) => Some(Value::Number(n.clone())),
        Some(_) => None,
    }
}

fn mismatch(kind: &str, inner: &Value) -> RepositoryError {
    RepositoryError::malformed_document(format!("{kind} has unexpected payload: {inner}"))
}
