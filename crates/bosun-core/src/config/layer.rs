//! A single named configuration layer

use bosun_fs::DocumentStore;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::Result;
use crate::env::EnvVars;

/// Separator inside environment variable names that maps to a key segment.
const ENV_SEGMENT_SEPARATOR: &str = "__";

/// The kinds of layer, declared from highest to lowest precedence.
///
/// The ordering is fixed: a store always consults layers in this order no
/// matter when they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    EnvOverride,
    Env,
    File,
    Defaults,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvOverride => "env-override",
            Self::Env => "env",
            Self::File => "file",
            Self::Defaults => "defaults",
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a key on `.` and `:`, dropping empty segments.
pub fn split_key(key: &str) -> Vec<&str> {
    key.split(['.', ':']).filter(|s| !s.is_empty()).collect()
}

/// One source of configuration values.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    source: Option<PathBuf>,
    data: Value,
}

impl Layer {
    /// A layer backed by an in-memory document.
    ///
    /// Non-object documents are treated as empty.
    pub fn from_value(kind: LayerKind, data: Value) -> Self {
        let data = if data.is_object() {
            data
        } else {
            Value::Object(Map::new())
        };
        Self {
            kind,
            source: None,
            data,
        }
    }

    /// A layer backed by a file. A missing file gives an empty layer that
    /// still remembers its path, so it can be saved later.
    pub fn from_file(kind: LayerKind, path: &Path) -> Result<Self> {
        let data = DocumentStore::new()
            .load_optional(path)?
            .unwrap_or_else(|| Value::Object(Map::new()));
        tracing::debug!(layer = %kind, ?path, "Loaded config layer");
        let mut layer = Self::from_value(kind, data);
        layer.source = Some(path.to_path_buf());
        Ok(layer)
    }

    /// A layer holding every environment variable as a string value.
    pub fn from_env(env: &EnvVars) -> Self {
        let mut data = Value::Object(Map::new());
        for (name, value) in env.iter() {
            let segments: Vec<&str> = name
                .split(ENV_SEGMENT_SEPARATOR)
                .filter(|s| !s.is_empty())
                .collect();
            insert_path(&mut data, &segments, Value::String(value.to_string()));
        }
        Self {
            kind: LayerKind::Env,
            source: None,
            data,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// File the layer was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Value at `segments`; the whole document for an empty path.
    pub fn lookup(&self, segments: &[&str]) -> Option<&Value> {
        segments
            .iter()
            .try_fold(&self.data, |node, segment| node.as_object()?.get(*segment))
    }

    pub(crate) fn insert(&mut self, segments: &[&str], value: Value) {
        insert_path(&mut self.data, segments, value);
    }

    /// Save the layer back to the file it came from.
    pub fn save(&self) -> Result<()> {
        let path = self.source.as_deref().ok_or_else(|| crate::Error::LayerMissing {
            layer: self.kind.to_string(),
        })?;
        DocumentStore::new().save(path, &self.data)?;
        tracing::debug!(layer = %self.kind, ?path, "Saved config layer");
        Ok(())
    }
}

/// Set `value` at `segments`, creating (or replacing scalars with) objects
/// along the way.
fn insert_path(root: &mut Value, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return;
    };

    let mut node = root;
    for segment in parents {
        node = ensure_object(node)
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(node).insert((*last).to_string(), value);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    let Value::Object(map) = value else {
        unreachable!("value was just replaced with an object");
    };
    map
}
