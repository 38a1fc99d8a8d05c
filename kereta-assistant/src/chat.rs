use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use kereta_core::{BookingSession, SessionRepository};
use crate::error::AssistantError;
use crate::gemini::{ChatModel, Content, FunctionCall, FunctionResponse};
use crate::tools::ToolRegistry;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,
    pub session_id: String,
}

/// A prior turn as the client remembers it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
}

/// Runs one chat turn: forward the message, execute any function calls the
/// model asks for, and return the first plain-text answer.
pub struct ChatAgent {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    sessions: Arc<dyn SessionRepository>,
    max_tool_rounds: usize,
    /// One lock per session id; a turn holds it from load to save.
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ChatAgent {
    pub fn new(
        model: Arc<dyn ChatModel>,
        tools: ToolRegistry,
        sessions: Arc<dyn SessionRepository>,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            model,
            tools,
            sessions,
            max_tool_rounds,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn chat(&self, req: ChatRequest) -> Result<ChatReply, AssistantError> {
        let turn_lock = self.turn_lock(&req.session_id).await;
        let _turn = turn_lock.lock().await;

        let mut session = self.sessions.get(&req.session_id).await?
            .unwrap_or_else(|| BookingSession::new(&req.session_id));

        let mut contents = history_to_contents(&req.conversation_history);
        contents.push(Content::user_text(req.message));

        let outcome = self.converse(&mut contents, &mut session).await;

        // Tool calls that ran before a failure still happened; keep their trace.
        self.sessions.save(session).await?;
        outcome
    }

    async fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.turn_locks.lock().await
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    pub async fn session(&self, session_id: &str) -> Result<Option<BookingSession>, AssistantError> {
        Ok(self.sessions.get(session_id).await?)
    }

    async fn converse(
        &self,
        contents: &mut Vec<Content>,
        session: &mut BookingSession,
    ) -> Result<ChatReply, AssistantError> {
        let mut rounds = 0;

        loop {
            let reply = self.model.generate(contents).await?;
            let calls: Vec<FunctionCall> = reply.function_calls().cloned().collect();

            if calls.is_empty() {
                let text = reply.text();
                if text.is_empty() {
                    return Err(AssistantError::EmptyResponse);
                }
                debug!("Chat {} answered after {} tool rounds", session.session_id, rounds);
                return Ok(ChatReply { content: text });
            }

            rounds += 1;
            if rounds > self.max_tool_rounds {
                return Err(AssistantError::ToolLoopExceeded(self.max_tool_rounds));
            }

            contents.push(reply);
            let mut responses = Vec::with_capacity(calls.len());
            for call in &calls {
                info!("Chat {} calling {}", session.session_id, call.name);
                let result = self.tools.dispatch(call, session).await;
                responses.push(FunctionResponse::new(call.name.clone(), result));
            }
            contents.push(Content::function_responses(responses));
        }
    }
}

/// `user` turns stay user turns; everything else was said by the model.
fn history_to_contents(history: &[HistoryMessage]) -> Vec<Content> {
    history.iter().map(|message| {
        let text = message.content.clone().unwrap_or_default();
        match message.role.as_deref() {
            Some("user") => Content::user_text(text),
            _ => Content::model_text(text),
        }
    }).collect()
}
