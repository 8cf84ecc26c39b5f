//! CDN URL helpers
//!
//! Without `aws.cdn` assets are served by a local CDN on `cdn.port`
//! (default 7334) or `cdn.url`. A remote CDN gets the environment appended
//! to its base URL.

use crate::context::RunContext;

const DEFAULT_CDN_PORT: &str = "7334";

impl RunContext {
    pub fn is_local_cdn(&self) -> bool {
        self.config.get_str("aws.cdn").is_none()
    }

    pub fn cdn_url(&self) -> String {
        if let Some(remote) = self.config.get_str("aws.cdn") {
            return remote;
        }
        let port = self
            .config
            .get_str("cdn.port")
            .unwrap_or_else(|| DEFAULT_CDN_PORT.to_string());
        self.config
            .get_str("cdn.url")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
    }

    pub fn base_cdn_url(&self) -> String {
        let mut base = self.cdn_url();
        if base.ends_with('/') {
            base.pop();
        }
        if !self.is_local_cdn() {
            base.push('/');
            base.push_str(&self.options.environment);
        }
        base
    }

    pub fn asset_cdn_url(&self, asset: &str) -> String {
        let asset = asset.strip_prefix('/').unwrap_or(asset);
        format!("{}/{asset}", self.base_cdn_url())
    }
}
