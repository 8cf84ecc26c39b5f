//! Command providers and the local-over-global registry

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Command, CommandHandle, CommandLocation, CommandOrigin, is_valid_command_name};

/// A source of commands.
pub trait CommandProvider: Send + Sync {
    /// Human readable description, used in diagnostics.
    fn describe(&self) -> String;

    /// Find the command called `name`.
    fn resolve(&self, name: &str) -> Option<CommandHandle>;

    /// Names of every command this provider offers.
    fn list(&self) -> Vec<String>;
}

/// Commands compiled into the binary and registered explicitly.
#[derive(Default, Clone)]
pub struct BuiltinProvider {
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl BuiltinProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, command: Arc<dyn Command>) -> &mut Self {
        self.commands.insert(name.into(), command);
        self
    }

    pub fn with(mut self, name: impl Into<String>, command: Arc<dyn Command>) -> Self {
        self.register(name, command);
        self
    }
}

impl CommandProvider for BuiltinProvider {
    fn describe(&self) -> String {
        "builtin commands".to_string()
    }

    fn resolve(&self, name: &str) -> Option<CommandHandle> {
        self.commands.get(name).map(|command| CommandHandle {
            name: name.to_string(),
            location: CommandLocation::Builtin,
            command: Arc::clone(command),
        })
    }

    fn list(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

/// Several providers consulted in order; the first match wins.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn CommandProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CommandProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl CommandProvider for ProviderChain {
    fn describe(&self) -> String {
        self.providers
            .iter()
            .map(|p| p.describe())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn resolve(&self, name: &str) -> Option<CommandHandle> {
        self.providers.iter().find_map(|p| p.resolve(name))
    }

    fn list(&self) -> Vec<String> {
        dedup_in_order(self.providers.iter().flat_map(|p| p.list()))
    }
}

/// A command found by the registry.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub handle: CommandHandle,
    pub origin: CommandOrigin,
    /// The global command hidden by a local one of the same name
    pub shadowed: Option<CommandHandle>,
}

/// Resolves command names against a local and a global provider.
///
/// Both providers are always consulted so that a local command shadowing a
/// global one can be reported. Local wins.
pub struct CommandRegistry {
    local: Box<dyn CommandProvider>,
    global: Box<dyn CommandProvider>,
}

impl CommandRegistry {
    pub fn new(local: impl CommandProvider + 'static, global: impl CommandProvider + 'static) -> Self {
        Self {
            local: Box::new(local),
            global: Box::new(global),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        if !is_valid_command_name(name) {
            tracing::debug!(name, "Rejecting invalid command name");
            return None;
        }

        let local = self.local.resolve(name);
        let global = self.global.resolve(name);
        tracing::debug!(
            name,
            local = %self.local.describe(),
            found_local = local.is_some(),
            global = %self.global.describe(),
            found_global = global.is_some(),
            "Resolved command providers"
        );

        match (local, global) {
            (Some(handle), shadowed) => Some(Resolved {
                handle,
                origin: CommandOrigin::Local,
                shadowed,
            }),
            (None, Some(handle)) => Some(Resolved {
                handle,
                origin: CommandOrigin::Global,
                shadowed: None,
            }),
            (None, None) => None,
        }
    }

    /// Every command name available, global ones first, without duplicates.
    pub fn list(&self) -> Vec<String> {
        dedup_in_order(self.global.list().into_iter().chain(self.local.list()))
    }
}

fn dedup_in_order(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names.filter(|n| seen.insert(n.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandError;
    use crate::context::RunContext;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Command for Noop {
        async fn run(&self, _ctx: &mut RunContext, _args: &[String]) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn provider(names: &[&str]) -> BuiltinProvider {
        names
            .iter()
            .fold(BuiltinProvider::new(), |p, n| p.with(*n, Arc::new(Noop)))
    }

    #[test]
    fn local_shadows_global() {
        let registry = CommandRegistry::new(provider(&["build"]), provider(&["build", "clone"]));

        let resolved = registry.resolve("build").unwrap();
        assert_eq!(resolved.origin, CommandOrigin::Local);
        assert!(resolved.shadowed.is_some());

        let resolved = registry.resolve("clone").unwrap();
        assert_eq!(resolved.origin, CommandOrigin::Global);
        assert!(resolved.shadowed.is_none());

        assert!(registry.resolve("deploy").is_none());
    }

    #[test]
    fn listing_is_deduplicated_union() {
        let registry = CommandRegistry::new(
            provider(&["build", "local-only"]),
            provider(&["build", "clone"]),
        );

        assert_eq!(registry.list(), vec!["build", "clone", "local-only"]);
    }

    #[test]
    fn chain_describes_every_provider() {
        let chain = ProviderChain::new()
            .with(provider(&["a"]))
            .with(crate::command::ScriptDirectory::new("/opt/bosun/commands"));

        assert_eq!(chain.describe(), "builtin commands, /opt/bosun/commands");
    }

    #[test]
    fn chain_takes_first_match() {
        let chain = ProviderChain::new()
            .with(provider(&["a"]))
            .with(provider(&["a", "b"]));

        assert!(chain.resolve("b").is_some());
        assert_eq!(chain.list(), vec!["a", "b"]);
    }
}
