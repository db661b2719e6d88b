//! Layered merge for YAML configuration values.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (a project's `check.dependencies`
//!   replaces the user's list rather than appending to it)
//! - `null` in the overlay deletes the key from the base
//! - Scalars in the overlay replace scalars in the base

use serde_yaml::Value;

/// Merge `overlay` onto `base`, overlay winning at each conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();

            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let combined = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), combined);
            }

            Value::Mapping(merged)
        }
        // An empty file parses to null; treat it as "no changes".
        (base, Value::Null) => base.clone(),
        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order, last one highest priority.
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
