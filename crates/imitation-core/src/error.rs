use thiserror::Error;

/// Closed error taxonomy for every fallible boundary operation in the
/// session fabric. No variant is ever serialized into a game-session wire
/// frame — see `GameError::code` and the HTTP control-surface handlers.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed or unknown frame: {0}")]
    Protocol(String),

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("pair slot not found: {0}")]
    PairNotFound(String),

    #[error("ticket does not belong to pair {pair_id}")]
    TicketPairMismatch { pair_id: String },

    #[error("language-model capability failed: {0}")]
    LlmFailure(String),

    #[error("language-model capability timed out after {ms}ms")]
    LlmTimeout { ms: u64 },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Short machine-readable code. Used for HTTP `{error:{code,message}}`
    /// bodies and for structured log fields — never for in-session frames.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Config(_) => "CONFIG_ERROR",
            GameError::Protocol(_) => "PROTOCOL_ERROR",
            GameError::TicketNotFound(_) => "TICKET_NOT_FOUND",
            GameError::PairNotFound(_) => "PAIR_NOT_FOUND",
            GameError::TicketPairMismatch { .. } => "TICKET_PAIR_MISMATCH",
            GameError::LlmFailure(_) => "LLM_PROVIDER_ERROR",
            GameError::LlmTimeout { .. } => "LLM_TIMEOUT",
            GameError::Transport(_) => "TRANSPORT_ERROR",
            GameError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
