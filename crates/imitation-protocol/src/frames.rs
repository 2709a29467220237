use serde::{Deserialize, Serialize};

/// Frames sent from the server to a connected client. A closed tagged sum —
/// modeled this way rather than via runtime reflection so the compiler
/// checks exhaustiveness at every dispatch site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    MatchStart {
        role: &'static str,
        commit_hash: String,
        round_seconds: f64,
        turn_seconds: f64,
        opponent: &'static str,
        persona_name: Option<String>,
        version: String,
    },
    Tick {
        round_left: f64,
        turn_left: f64,
        turn: &'static str,
    },
    Typing {
        who: &'static str,
        on: bool,
    },
    Chat {
        from_: &'static str,
        text: String,
    },
    State {
        opponent: &'static str,
        round_left: f64,
        turn_left: f64,
        turn: &'static str,
    },
    End {
        reason: EndReason,
        winner: Option<&'static str>,
        correct: Option<bool>,
        score_delta: i64,
        reveal: Reveal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Guess,
    Timeout,
    Disconnect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reveal {
    pub opponent_type: &'static str,
    pub nonce: String,
    pub commit_ts: u64,
}

/// Frames accepted from a connected client. Anything that doesn't parse
/// into one of these variants is a client protocol error and is dropped —
/// see `imitation-core::error::GameError::Protocol`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    Chat { text: String },
    Guess { guess: String },
    State,
}

impl OutboundFrame {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_chat_parses_by_type_tag() {
        let raw = r#"{"type":"chat","text":"hi"}"#;
        let frame: InboundFrame = serde_json::from_str(raw).unwrap();
        match frame {
            InboundFrame::Chat { text } => assert_eq!(text, "hi"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn inbound_state_has_no_body() {
        let raw = r#"{"type":"state"}"#;
        let frame: InboundFrame = serde_json::from_str(raw).unwrap();
        assert!(matches!(frame, InboundFrame::State));
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let raw = r#"{"type":"teleport"}"#;
        assert!(serde_json::from_str::<InboundFrame>(raw).is_err());
    }

    #[test]
    fn outbound_chat_serializes_from_field_with_trailing_underscore() {
        let frame = OutboundFrame::Chat {
            from_: "B",
            text: "yo".to_string(),
        };
        let json = frame.to_json();
        assert!(json.contains("\"from_\":\"B\""));
    }
}
