//! Canonical JSON for artifact fingerprints
//!
//! Object keys are sorted recursively and output is compact, so two
//! artifacts with the same content hash identically regardless of how
//! the training export ordered its fields.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanonicalError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Serialize a value to canonical JSON (sorted keys, no whitespace)
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    let json_value =
        serde_json::to_value(value).map_err(|e| CanonicalError::Serialization(e.to_string()))?;

    serde_json::to_string(&canonicalize_value(json_value))
        .map_err(|e| CanonicalError::Serialization(e.to_string()))
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, canonicalize_value(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

/// BLAKE3 digest of the canonical JSON form, hex encoded
pub fn hash_canonical_hex<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    let json = to_canonical_json(value)?;
    Ok(hex::encode(blake3::hash(json.as_bytes()).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Scrambled {
        zeta: f64,
        alpha: Vec<f64>,
        mid: Inner,
    }

    #[derive(Serialize)]
    struct Inner {
        y: u32,
        b: u32,
    }

    #[test]
    fn keys_sorted_at_every_level() {
        let data = Scrambled {
            zeta: 0.5,
            alpha: vec![1.0, 2.0],
            mid: Inner { y: 2, b: 1 },
        };
        let json = to_canonical_json(&data).unwrap();
        assert_eq!(json, r#"{"alpha":[1.0,2.0],"mid":{"b":1,"y":2},"zeta":0.5}"#);
    }

    #[test]
    fn hash_ignores_source_key_order() {
        let a: Value = serde_json::from_str(r#"{"mean":[1.0],"scale":[2.0]}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"scale":[2.0],"mean":[1.0]}"#).unwrap();
        let hash = hash_canonical_hex(&a).unwrap();
        assert_eq!(hash, hash_canonical_hex(&b).unwrap());
        assert_eq!(hash.len(), 64);

        let c: Value = serde_json::from_str(r#"{"scale":[2.5],"mean":[1.0]}"#).unwrap();
        assert_ne!(hash, hash_canonical_hex(&c).unwrap());
    }
}
