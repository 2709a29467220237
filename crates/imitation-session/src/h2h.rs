use crate::conversation_log::ConversationLogSink;
use crate::state::RoundState;
use crate::transport::Transport;
use crate::SessionRunSettings;
use imitation_commit::Commitment;
use imitation_core::clock::now_ms;
use imitation_core::config::MAX_CHAT_CHARS;
use imitation_core::types::Side;
use imitation_protocol::frames::{EndReason, InboundFrame, OutboundFrame, Reveal};
use std::time::Duration;

/// Every H2H client is told it is "A" and its peer is "B" — `perspective`
/// rewrites an internal `Side` into the label a given client should see.
fn perspective(viewer: Side, actual: Side) -> &'static str {
    if actual == viewer {
        "A"
    } else {
        "B"
    }
}

fn reveal_from(commitment: &Commitment) -> Reveal {
    Reveal {
        opponent_type: commitment.opponent_type.as_str(),
        nonce: commitment.nonce.clone(),
        commit_ts: commitment.ts_ms,
    }
}

/// How an H2H session ended up starting. The gateway uses this to decide
/// whether a lone survivor needs degrading to an A-vs-bot session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H2hOutcome {
    Completed,
    KickoffFailed { survivor: Option<Side> },
}

/// Runs a human-vs-human session to completion across two independently
/// owned transports. Each side's `commitment` is its own — the two need not
/// (and structurally cannot) share a single commit hash; see
/// `imitation-matchmaker`'s pairing step.
pub async fn run_h2h<TA: Transport, TB: Transport>(
    transport_a: &mut TA,
    transport_b: &mut TB,
    commitment_a: Commitment,
    commitment_b: Commitment,
    settings: &SessionRunSettings,
    conversation_log: &ConversationLogSink,
    correlation_id: &str,
) -> H2hOutcome {
    let start = std::time::Instant::now();

    // Every client always sees itself as "A" — only this driver's internal
    // `Side` bookkeeping distinguishes the two physical peers.
    let match_start = |commitment: &Commitment| OutboundFrame::MatchStart {
        role: "A",
        commit_hash: commitment.hash.clone(),
        round_seconds: settings.session.round_limit_secs,
        turn_seconds: settings.session.turn_limit_secs,
        opponent: "HUMAN",
        persona_name: None,
        version: settings.app_version.clone(),
    };

    let ok_a = transport_a.send(&match_start(&commitment_a)).await;
    let ok_b = transport_b.send(&match_start(&commitment_b)).await;

    if !ok_a || !ok_b {
        tracing::warn!(correlation_id, ok_a, ok_b, "h2h kickoff failed for one side");
        return H2hOutcome::KickoffFailed {
            survivor: if ok_a {
                Some(Side::A)
            } else if ok_b {
                Some(Side::B)
            } else {
                None
            },
        };
    }

    let mut state = RoundState::new(settings.session.round_limit_secs, settings.session.turn_limit_secs);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut message_count = 0usize;

    while !state.ended {
        tokio::select! {
            _ = ticker.tick() => {
                let tick_a = OutboundFrame::Tick {
                    round_left: state.round_left(),
                    turn_left: state.turn_left(),
                    turn: perspective(Side::A, state.turn),
                };
                let tick_b = OutboundFrame::Tick {
                    round_left: state.round_left(),
                    turn_left: state.turn_left(),
                    turn: perspective(Side::B, state.turn),
                };
                let sa = transport_a.send(&tick_a).await;
                let sb = transport_b.send(&tick_b).await;
                if !sa || !sb {
                    end_both(transport_a, transport_b, &mut state, EndReason::Disconnect, Some(if sa { Side::A } else { Side::B }), &commitment_a, &commitment_b, settings).await;
                    break;
                }
                if state.round_left() <= 0.0 {
                    // Round expiry carries no winner/score, matching the
                    // turn-timeout branch below's scoring but not this one.
                    end_both(transport_a, transport_b, &mut state, EndReason::Timeout, None, &commitment_a, &commitment_b, settings).await;
                    break;
                }
                if state.turn_left() <= 0.0 {
                    let winner = state.turn.other();
                    end_both(transport_a, transport_b, &mut state, EndReason::Timeout, Some(winner), &commitment_a, &commitment_b, settings).await;
                    break;
                }
            }

            frame = transport_a.recv() => {
                match frame {
                    None => {
                        end_both(transport_a, transport_b, &mut state, EndReason::Disconnect, Some(Side::B), &commitment_a, &commitment_b, settings).await;
                        break;
                    }
                    Some(f) => {
                        if handle_chat_or_guess(Side::A, f, transport_a, transport_b, &mut state, settings, conversation_log, correlation_id, &mut message_count, &commitment_a, &commitment_b).await {
                            break;
                        }
                    }
                }
            }

            frame = transport_b.recv() => {
                match frame {
                    None => {
                        end_both(transport_a, transport_b, &mut state, EndReason::Disconnect, Some(Side::A), &commitment_a, &commitment_b, settings).await;
                        break;
                    }
                    Some(f) => {
                        if handle_chat_or_guess(Side::B, f, transport_a, transport_b, &mut state, settings, conversation_log, correlation_id, &mut message_count, &commitment_a, &commitment_b).await {
                            break;
                        }
                    }
                }
            }
        }
    }

    conversation_log.record_summary(correlation_id, "HUMAN", None, None, message_count, start.elapsed().as_secs_f64());
    H2hOutcome::Completed
}

#[allow(clippy::too_many_arguments)]
async fn handle_chat_or_guess<TA: Transport, TB: Transport>(
    tag: Side,
    frame: InboundFrame,
    transport_a: &mut TA,
    transport_b: &mut TB,
    state: &mut RoundState,
    settings: &SessionRunSettings,
    conversation_log: &ConversationLogSink,
    correlation_id: &str,
    message_count: &mut usize,
    commitment_a: &Commitment,
    commitment_b: &Commitment,
) -> bool {
    match frame {
        InboundFrame::Chat { text } if state.turn == tag => {
            let text: String = text.trim().chars().take(MAX_CHAT_CHARS).collect();
            if text.is_empty() {
                return false;
            }
            state.history.push(format!("{}: {}", tag.as_str(), text));
            conversation_log.record_message(correlation_id, tag.as_str(), &text, now_ms());
            *message_count += 1;

            let chat_a = OutboundFrame::Chat { from_: perspective(Side::A, tag), text: text.clone() };
            let chat_b = OutboundFrame::Chat { from_: perspective(Side::B, tag), text };
            let _ = transport_a.send(&chat_a).await;
            let _ = transport_b.send(&chat_b).await;
            state.swap_turn(settings.session.turn_limit_secs);
            false
        }
        InboundFrame::Chat { .. } => false,
        InboundFrame::Guess { guess } => {
            let correct = guess.to_uppercase() == "HUMAN";
            let delta = if correct { settings.session.score_correct } else { settings.session.score_wrong };
            match tag {
                Side::A => state.score_a += delta,
                Side::B => state.score_b += delta,
            }
            state.ended = true;
            let _ = transport_a
                .send(&OutboundFrame::End {
                    reason: EndReason::Guess,
                    winner: None,
                    correct: Some(correct),
                    score_delta: state.score_a,
                    reveal: reveal_from(commitment_a),
                })
                .await;
            let _ = transport_b
                .send(&OutboundFrame::End {
                    reason: EndReason::Guess,
                    winner: None,
                    correct: Some(correct),
                    score_delta: state.score_b,
                    reveal: reveal_from(commitment_b),
                })
                .await;
            true
        }
        InboundFrame::State => {
            let (viewer, transport_sent) = match tag {
                Side::A => (Side::A, transport_a.send(&OutboundFrame::State {
                    opponent: "HUMAN",
                    round_left: state.round_left(),
                    turn_left: state.turn_left(),
                    turn: perspective(Side::A, state.turn),
                }).await),
                Side::B => (Side::B, transport_b.send(&OutboundFrame::State {
                    opponent: "HUMAN",
                    round_left: state.round_left(),
                    turn_left: state.turn_left(),
                    turn: perspective(Side::B, state.turn),
                }).await),
            };
            let _ = (viewer, transport_sent);
            false
        }
    }
}

/// `winner = None` for round expiry, which carries no score change (mirrors
/// `a_vs_bot::end_game`'s round-expiry call and the original ticker, which
/// just exits with no winner/score assigned on round expiry — only turn
/// expiry and disconnect score a winner).
#[allow(clippy::too_many_arguments)]
async fn end_both<TA: Transport, TB: Transport>(
    transport_a: &mut TA,
    transport_b: &mut TB,
    state: &mut RoundState,
    reason: EndReason,
    winner: Option<Side>,
    commitment_a: &Commitment,
    commitment_b: &Commitment,
    settings: &SessionRunSettings,
) {
    state.ended = true;
    if let Some(winner) = winner {
        match winner {
            Side::A => state.score_a += settings.session.score_timeout_win,
            Side::B => state.score_b += settings.session.score_timeout_win,
        }
    }
    let _ = transport_a
        .send(&OutboundFrame::End {
            reason,
            winner: winner.map(|w| perspective(Side::A, w)),
            correct: None,
            score_delta: state.score_a,
            reveal: reveal_from(commitment_a),
        })
        .await;
    let _ = transport_b
        .send(&OutboundFrame::End {
            reason,
            winner: winner.map(|w| perspective(Side::B, w)),
            correct: None,
            score_delta: state.score_b,
            reveal: reveal_from(commitment_b),
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use imitation_core::types::OpponentType;
    use std::collections::VecDeque;

    struct FakeTransport {
        inbox: VecDeque<InboundFrame>,
        pub sent: Vec<OutboundFrame>,
    }

    impl FakeTransport {
        /// An empty inbox means "no more input yet", not "disconnected" —
        /// `recv` parks forever rather than returning `None`, matching a real
        /// socket that hasn't received another message.
        fn with_inbox(frames: Vec<InboundFrame>) -> Self {
            Self {
                inbox: frames.into(),
                sent: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&mut self, frame: &OutboundFrame) -> bool {
            self.sent.push(frame.clone());
            true
        }

        async fn recv(&mut self) -> Option<InboundFrame> {
            match self.inbox.pop_front() {
                Some(f) => Some(f),
                None => std::future::pending().await,
            }
        }
    }

    fn test_settings() -> SessionRunSettings {
        SessionRunSettings {
            session: imitation_core::config::SessionSettings {
                round_limit_secs: 60.0,
                turn_limit_secs: 20.0,
                score_correct: 100,
                score_wrong: -200,
                score_timeout_win: 100,
            },
            humanize: imitation_core::config::HumanizeSettings::default(),
            llm: imitation_core::config::LlmSettings::default(),
            app_version: "test-1.0".to_string(),
        }
    }

    #[tokio::test]
    async fn a_chat_message_from_a_reads_as_self_to_a_and_peer_to_b() {
        let mut transport_a = FakeTransport::with_inbox(vec![]);
        let mut transport_b = FakeTransport::with_inbox(vec![]);
        let commitment_a = imitation_commit::new_commitment(OpponentType::Human);
        let commitment_b = imitation_commit::new_commitment(OpponentType::Human);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);
        let mut state = RoundState::new(settings.session.round_limit_secs, settings.session.turn_limit_secs);
        let mut message_count = 0usize;

        let ended = handle_chat_or_guess(
            Side::A,
            InboundFrame::Chat { text: "hi b".to_string() },
            &mut transport_a,
            &mut transport_b,
            &mut state,
            &settings,
            &log,
            "corr-h2h-1",
            &mut message_count,
            &commitment_a,
            &commitment_b,
        )
        .await;

        assert!(!ended);
        assert_eq!(message_count, 1);
        assert_eq!(state.turn, Side::B);
        let a_saw_self = transport_a
            .sent
            .iter()
            .any(|f| matches!(f, OutboundFrame::Chat { from_: "A", text } if text == "hi b"));
        let b_saw_peer = transport_b
            .sent
            .iter()
            .any(|f| matches!(f, OutboundFrame::Chat { from_: "B", text } if text == "hi b"));
        assert!(a_saw_self);
        assert!(b_saw_peer);
    }

    #[tokio::test]
    async fn a_guess_ends_both_sides_with_independent_reveals() {
        let mut transport_a = FakeTransport::with_inbox(vec![InboundFrame::Guess { guess: "HUMAN".to_string() }]);
        let mut transport_b = FakeTransport::with_inbox(vec![]);
        let commitment_a = imitation_commit::new_commitment(OpponentType::Human);
        let commitment_b = imitation_commit::new_commitment(OpponentType::Human);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);

        let outcome = run_h2h(&mut transport_a, &mut transport_b, commitment_a, commitment_b, &settings, &log, "corr-h2h-2").await;

        assert_eq!(outcome, H2hOutcome::Completed);
        assert!(matches!(transport_a.sent.last(), Some(OutboundFrame::End { correct: Some(true), .. })));
        assert!(matches!(transport_b.sent.last(), Some(OutboundFrame::End { correct: Some(true), .. })));
    }

    #[tokio::test]
    async fn round_expiry_ends_both_sides_with_no_winner_and_no_score_change() {
        let mut transport_a = FakeTransport::with_inbox(vec![]);
        let mut transport_b = FakeTransport::with_inbox(vec![]);
        let commitment_a = imitation_commit::new_commitment(OpponentType::Human);
        let commitment_b = imitation_commit::new_commitment(OpponentType::Human);
        let settings = test_settings();
        let mut state = RoundState::new(settings.session.round_limit_secs, settings.session.turn_limit_secs);

        end_both(&mut transport_a, &mut transport_b, &mut state, EndReason::Timeout, None, &commitment_a, &commitment_b, &settings).await;

        assert_eq!(state.score_a, 0);
        assert_eq!(state.score_b, 0);
        assert!(matches!(transport_a.sent.last(), Some(OutboundFrame::End { winner: None, .. })));
        assert!(matches!(transport_b.sent.last(), Some(OutboundFrame::End { winner: None, .. })));
    }

    #[tokio::test]
    async fn a_dead_peer_reports_kickoff_failure_with_the_alive_survivor() {
        struct DeadTransport;

        #[async_trait]
        impl Transport for DeadTransport {
            async fn send(&mut self, _frame: &OutboundFrame) -> bool {
                false
            }

            async fn recv(&mut self) -> Option<InboundFrame> {
                std::future::pending().await
            }
        }

        let mut transport_a = FakeTransport::with_inbox(vec![]);
        let mut transport_b = DeadTransport;
        let commitment_a = imitation_commit::new_commitment(OpponentType::Human);
        let commitment_b = imitation_commit::new_commitment(OpponentType::Human);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);

        let outcome = run_h2h(&mut transport_a, &mut transport_b, commitment_a, commitment_b, &settings, &log, "corr-h2h-3").await;

        assert_eq!(outcome, H2hOutcome::KickoffFailed { survivor: Some(Side::A) });
    }
}
