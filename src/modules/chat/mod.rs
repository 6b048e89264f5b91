pub mod model;
pub mod orchestrator;
pub mod reasoning;

pub use model::{ChatMessage, ChatModel, ChatModelError, MessageRole, OpenAiChatModel};
pub use orchestrator::{ConversationOrchestrator, FALLBACK_REPLY};
pub use reasoning::{ReasoningAgent, REASONING_FALLBACK};
