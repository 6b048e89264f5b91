use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use companion_engine::{MessagePlugin, PluginError, SessionState};

/// Always replaces the reply with a fixed string.
pub struct ReplyPlugin {
    pub reply: String,
}

impl ReplyPlugin {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl MessagePlugin for ReplyPlugin {
    fn name(&self) -> &str {
        "reply"
    }

    fn on_message(
        &self,
        _message: &str,
        _state: &SessionState,
    ) -> Result<Option<String>, PluginError> {
        Ok(Some(self.reply.clone()))
    }
}

/// Counts invocations; optionally replies. The counter is shared so tests can
/// assert on short-circuit behaviour.
pub struct CountingPlugin {
    pub hits: Arc<AtomicUsize>,
    pub reply: Option<String>,
}

impl CountingPlugin {
    pub fn silent(hits: Arc<AtomicUsize>) -> Self {
        Self { hits, reply: None }
    }

    pub fn replying(hits: Arc<AtomicUsize>, reply: impl Into<String>) -> Self {
        Self {
            hits,
            reply: Some(reply.into()),
        }
    }
}

impl MessagePlugin for CountingPlugin {
    fn name(&self) -> &str {
        "counting"
    }

    fn on_message(
        &self,
        _message: &str,
        _state: &SessionState,
    ) -> Result<Option<String>, PluginError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Fails on every call.
pub struct FailingPlugin;

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
