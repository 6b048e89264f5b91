use super::{MessagePlugin, PluginError};
use crate::modules::session::SessionState;

/// Answers the `/status` command with the session's current affect readout
/// instead of invoking the language model.
pub struct StatusPlugin;

impl MessagePlugin for StatusPlugin {
    fn name(&self) -> &str {
        "status"
    }

    fn on_message(
        &self,
        message: &str,
        state: &SessionState,
    ) -> Result<Option<String>, PluginError> {
        if message.trim() != "/status" {
            return Ok(None);
        }
        let (mood, trust, energy) = state.emotion.values();
        Ok(Some(format!(
            "Mood {:.2}, trust {:.2}, energy {:.2} after {} turns.",
            mood,
            trust,
            energy,
            state.transcript.len() / 2
        )))
    }
}
