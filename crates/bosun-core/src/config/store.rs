//! Precedence-ordered lookup across configuration layers

use serde_json::Value;
use std::collections::BTreeMap;

use super::layer::{Layer, LayerKind, split_key};
use crate::{Error, Result};

/// Queryable key space over a fixed-precedence set of layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    layers: BTreeMap<LayerKind, Layer>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, replacing any existing layer of the same kind.
    ///
    /// Where the layer sits in the lookup order depends only on its kind.
    pub fn add_layer(&mut self, layer: Layer) {
        tracing::debug!(layer = %layer.kind(), "Adding config layer");
        self.layers.insert(layer.kind(), layer);
    }

    pub fn remove_layer(&mut self, kind: LayerKind) -> Option<Layer> {
        self.layers.remove(&kind)
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.get(&kind)
    }

    /// Layers from highest to lowest precedence.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Look up `key`.
    ///
    /// Scalars and arrays come from the highest layer that defines the key.
    /// When that value is an object, keys missing from it are filled in from
    /// lower layers (recursively), down to the first layer where the key is
    /// not an object. Key order follows the highest layer first.
    pub fn get(&self, key: &str) -> Option<Value> {
        let segments = split_key(key);
        let mut found = self.layers.values().filter_map(|l| l.lookup(&segments));

        let top = found.next()?;
        if !top.is_object() {
            return Some(top.clone());
        }

        let mut merged = top.clone();
        for lower in found {
            if !lower.is_object() {
                break;
            }
            fill_missing(&mut merged, lower);
        }
        Some(merged)
    }

    /// String value at `key`; numbers and booleans are rendered, empty
    /// strings count as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Boolean value at `key`. Strings `true`, `yes`, `1` (any case) are
    /// true, as environment variables only carry strings.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => false,
        }
    }

    /// List of strings at `key`; non-string items are skipped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set `key` in the user config layer. Nothing is written until
    /// [`save`](Self::save).
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let layer = self
            .layers
            .get_mut(&LayerKind::File)
            .ok_or_else(|| Error::LayerMissing {
                layer: LayerKind::File.to_string(),
            })?;
        layer.insert(&split_key(key), value);
        Ok(())
    }

    /// Persist the user config layer to its file.
    pub fn save(&self) -> Result<()> {
        self.layers
            .get(&LayerKind::File)
            .ok_or_else(|| Error::LayerMissing {
                layer: LayerKind::File.to_string(),
            })?
            .save()
    }
}

/// Copy keys of `lower` that `target` lacks, recursing into objects both
/// sides define. Existing values in `target` always win.
fn fill_missing(target: &mut Value, lower: &Value) {
    let (Value::Object(target), Value::Object(lower)) = (target, lower) else {
        return;
    };
    for (key, value) in lower {
        match target.get_mut(key) {
            Some(existing) => fill_missing(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
