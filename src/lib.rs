pub mod api;
pub mod config;
pub mod modules;

pub use config::{Character, ConfigError, Settings, VectorStoreKind};
pub use modules::chat::{
    ChatMessage, ChatModel, ChatModelError, ConversationOrchestrator, MessageRole,
    OpenAiChatModel, ReasoningAgent, FALLBACK_REPLY, REASONING_FALLBACK,
};
pub use modules::emotion::{EmotionEngine, EmotionState, LexiconSentiment, SentimentAnalyzer};
pub use modules::events::EventAgent;
pub use modules::memory::{MemoryError, MemoryHit, MemoryRecord, MemoryStore};
pub use modules::plugins::{MessagePlugin, PluginChain, PluginError};
pub use modules::session::{SessionRegistry, SessionState, TurnEntry, TurnPhase, TurnRole};
