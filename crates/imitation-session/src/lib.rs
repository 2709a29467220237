mod a_vs_bot;
mod conversation_log;
mod h2h;
mod state;
mod transport;

pub use a_vs_bot::run_a_vs_bot;
pub use conversation_log::ConversationLogSink;
pub use h2h::{run_h2h, H2hOutcome};
pub use state::RoundState;
pub use transport::Transport;

use imitation_core::config::{HumanizeSettings, LlmSettings, SessionSettings};

/// Tuning a driver reads for the lifetime of one session. Cloned once per
/// connection out of the process-wide `Settings` rather than threaded
/// argument by argument.
#[derive(Debug, Clone)]
pub struct SessionRunSettings {
    pub session: SessionSettings,
    pub humanize: HumanizeSettings,
    pub llm: LlmSettings,
    pub app_version: String,
}
