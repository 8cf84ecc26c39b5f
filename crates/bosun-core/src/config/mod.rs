//! Layered configuration
//!
//! Configuration is looked up across a fixed set of layers. The highest
//! precedence layer that defines a key wins:
//!
//! 1. **Environment override** - `<workspace>/.bosun/<environment>.json`,
//!    added once the workspace is known
//! 2. **Process environment** - every variable, `__` separating segments
//! 3. **User config** - `<config_dir>/config.json` or `--config-file`
//! 4. **Defaults** - `<config_dir>/defaults.json`, or the packaged defaults
//!
//! Keys are segmented with `.` or `:` (`github.user`, `teams:org/web:path`).
//! Objects are merged across layers, with higher layers winning per leaf.
//!
//! # Example
//!
//! ```ignore
//! use bosun_core::config::{ConfigStore, Layer, LayerKind};
//!
//! let mut store = ConfigStore::new();
//! store.add_layer(Layer::from_file(LayerKind::File, &config_file)?);
//! let user = store.get_str("github.user");
//! ```

mod layer;
mod store;

pub use layer::{Layer, LayerKind, split_key};
pub use store::ConfigStore;
