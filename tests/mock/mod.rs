pub mod chat_mock;
pub mod plugin_mock;
pub mod sentiment_mock;

pub use chat_mock::MockChatModel;
pub use plugin_mock::{CountingPlugin, FailingPlugin, ReplyPlugin};
pub use sentiment_mock::ScriptedSentiment;

use std::path::Path;

use companion_engine::config::{Settings, VectorStoreKind};

pub fn test_settings(dir: &Path, vector_store: VectorStoreKind) -> Settings {
    let mut settings = Settings::default();
    settings.memory_file = dir.join("memory.json");
    settings.vector_store = vector_store;
    settings
}
