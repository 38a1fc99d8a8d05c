use kereta_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Chat model not configured: {0}")]
    NotConfigured(String),

    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model returned HTTP {status}: {body}")]
    Upstream {
        status: u16,
        body: String,
    },

    #[error("Model returned no usable content")]
    EmptyResponse,

    #[error("Model requested more than {0} rounds of tool calls")]
    ToolLoopExceeded(usize),

    #[error(transparent)]
    Store(#[from] CoreError),
}
