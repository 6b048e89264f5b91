pub mod builtin;

use thiserror::Error;

use crate::modules::session::SessionState;

pub use builtin::StatusPlugin;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin failure: {0}")]
    Failed(String),
}

/// Hook invoked before the default reply path. `Ok(None)` means no opinion;
/// a non-empty `Ok(Some(reply))` replaces the default reply for the turn.
pub trait MessagePlugin: Send + Sync {
    fn name(&self) -> &str;

    fn on_message(
        &self,
        message: &str,
        state: &SessionState,
    ) -> Result<Option<String>, PluginError>;
}

/// Explicit registration list, invoked in registration order. A failing
/// plugin is logged and skipped; it can never abort the turn or block the
/// plugins behind it.
pub struct PluginChain {
    plugins: Vec<Box<dyn MessagePlugin>>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Chain with the stock plugins registered.
    pub fn with_builtin() -> Self {
        let mut chain = Self::new();
        chain.register(Box::new(StatusPlugin));
        chain
    }

    pub fn register(&mut self, plugin: Box<dyn MessagePlugin>) {
        tracing::info!(plugin = plugin.name(), "plugin registered");
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns the first non-empty replacement reply, or `None` to fall
    /// through to the default path.
    pub fn intercept(&self, message: &str, state: &SessionState) -> Option<String> {
        for plugin in &self.plugins {
            match plugin.on_message(message, state) {
                Ok(Some(reply)) if !reply.is_empty() => {
                    tracing::debug!(plugin = plugin.name(), "plugin replaced the reply");
                    return Some(reply);
                }
                Ok(Some(_)) => {
                    tracing::debug!(
                        plugin = plugin.name(),
                        "plugin returned an empty reply; treating as no opinion"
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(plugin = plugin.name(), error = %e, "plugin failed; skipping");
                }
            }
        }
        None
    }
}

impl Default for PluginChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{MessagePlugin, PluginChain, PluginError};
    use crate::modules::session::SessionState;

    struct FixedPlugin(&'static str);

    impl MessagePlugin for FixedPlugin {
        fn name(&self) -> &str {
            "fixed"
        }

        fn on_message(
            &self,
            _message: &str,
            _state: &SessionState,
        ) -> Result<Option<String>, PluginError> {
            Ok(Some(self.0.to_string()))
        }
    }

    struct SilentPlugin;

    impl MessagePlugin for SilentPlugin {
        fn name(&self) -> &str {
            "silent"
        }

        fn on_message(
            &self,
            _message: &str,
            _state: &SessionState,
        ) -> Result<Option<String>, PluginError> {
            Ok(None)
        }
    }

    struct FailingPlugin;

    impl MessagePlugin for FailingPlugin {
        fn name(&self) -> &str {
            "failing"
        }

        fn on_message(
            &self,
            _message: &str,
            _state: &SessionState,
        ) -> Result<Option<String>, PluginError> {
            Err(PluginError::Failed("always broken".to_string()))
        }
    }

    #[test]
    fn test_empty_chain_falls_through() {
        let chain = PluginChain::new();
        let state = SessionState::new();
        assert!(chain.intercept("hello", &state).is_none());
    }

    #[test]
    fn test_first_replacement_wins() {
        let mut chain = PluginChain::new();
        chain.register(Box::new(FixedPlugin("first")));
        chain.register(Box::new(FixedPlugin("second")));
        let state = SessionState::new();
        assert_eq!(chain.intercept("hi", &state).as_deref(), Some("first"));
    }

    #[test]
    fn test_failing_plugin_does_not_block_later_ones() {
        let mut chain = PluginChain::new();
        chain.register(Box::new(FailingPlugin));
        chain.register(Box::new(FixedPlugin("rescued")));
        let state = SessionState::new();
        assert_eq!(chain.intercept("hi", &state).as_deref(), Some("rescued"));
    }

    #[test]
    fn test_empty_reply_is_no_opinion() {
        let mut chain = PluginChain::new();
        chain.register(Box::new(FixedPlugin("")));
        chain.register(Box::new(SilentPlugin));
        let state = SessionState::new();
        assert!(chain.intercept("hi", &state).is_none());
    }
}
