pub mod chat;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod tools;

pub use chat::{ChatAgent, ChatReply, ChatRequest, HistoryMessage};
pub use error::AssistantError;
pub use gemini::{ChatModel, GeminiClient};
pub use tools::ToolRegistry;
