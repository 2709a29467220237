use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Best-effort, write-only conversation sink. Disabled when no directory is
/// configured. Every write is dispatched to its own background task so it
/// never blocks the session's message loop; a failure is logged and
/// otherwise swallowed — nothing in-game ever reads this back.
#[derive(Clone)]
pub struct ConversationLogSink {
    dir: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LogRow<'a> {
    Message {
        correlation_id: &'a str,
        sender: &'a str,
        text: &'a str,
        ts_ms: u64,
    },
    Summary {
        correlation_id: &'a str,
        opponent_type: &'a str,
        persona_name: Option<&'a str>,
        guess_outcome: Option<&'a str>,
        message_count: usize,
        duration_secs: f64,
    },
}

impl ConversationLogSink {
    pub fn new(dir: Option<String>) -> Self {
        Self { dir: dir.map(PathBuf::from) }
    }

    fn path_for(&self, correlation_id: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{correlation_id}.jsonl")))
    }

    fn append_line(&self, correlation_id: &str, line: String) {
        let Some(path) = self.path_for(correlation_id) else {
            return;
        };
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
                writeln!(file, "{line}")
            })
            .await;
            if let Ok(Err(e)) = result {
                tracing::warn!(error = %e, "conversation log write failed");
            }
        });
    }

    pub fn record_message(&self, correlation_id: &str, sender: &str, text: &str, ts_ms: u64) {
        let row = LogRow::Message {
            correlation_id,
            sender,
            text,
            ts_ms,
        };
        if let Ok(line) = serde_json::to_string(&row) {
            self.append_line(correlation_id, line);
        }
    }

    pub fn record_summary(
        &self,
        correlation_id: &str,
        opponent_type: &str,
        persona_name: Option<&str>,
        guess_outcome: Option<&str>,
        message_count: usize,
        duration_secs: f64,
    ) {
        let row = LogRow::Summary {
            correlation_id,
            opponent_type,
            persona_name,
            guess_outcome,
            message_count,
            duration_secs,
        };
        if let Ok(line) = serde_json::to_string(&row) {
            self.append_line(correlation_id, line);
        }
    }
}
