use crate::conversation_log::ConversationLogSink;
use crate::state::RoundState;
use crate::transport::Transport;
use crate::SessionRunSettings;
use imitation_commit::Commitment;
use imitation_core::clock::now_ms;
use imitation_core::config::MAX_CHAT_CHARS;
use imitation_core::types::Side;
use imitation_mood::MoodState;
use imitation_persona::Persona;
use imitation_protocol::frames::{EndReason, InboundFrame, OutboundFrame, Reveal};
use rand::Rng;
use std::time::Duration;

fn reveal_from(commitment: &Commitment) -> Reveal {
    Reveal {
        opponent_type: commitment.opponent_type.as_str(),
        nonce: commitment.nonce.clone(),
        commit_ts: commitment.ts_ms,
    }
}

/// Runs a single A-vs-bot session to completion. Returns once `end` has been
/// sent (or the transport died) — the caller tears down any owning
/// registrations (pool token, ticket bookkeeping) afterward.
pub async fn run_a_vs_bot<T: Transport>(
    transport: &mut T,
    commitment: Commitment,
    persona: Persona,
    settings: &SessionRunSettings,
    bot: Option<&dyn imitation_llm::GenerateReply>,
    conversation_log: &ConversationLogSink,
    correlation_id: &str,
) {
    let start = std::time::Instant::now();
    let mut state = RoundState::new(settings.session.round_limit_secs, settings.session.turn_limit_secs);

    let sent = transport
        .send(&OutboundFrame::MatchStart {
            role: "A",
            commit_hash: commitment.hash.clone(),
            round_seconds: settings.session.round_limit_secs,
            turn_seconds: settings.session.turn_limit_secs,
            opponent: "AI",
            persona_name: Some(persona.name.clone()),
            version: settings.app_version.clone(),
        })
        .await;
    if !sent {
        return;
    }

    let mut mood = MoodState::default();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut message_count = 0usize;

    while !state.ended {
        tokio::select! {
            _ = ticker.tick() => {
                if !transport
                    .send(&OutboundFrame::Tick {
                        round_left: state.round_left(),
                        turn_left: state.turn_left(),
                        turn: state.turn.as_str(),
                    })
                    .await
                {
                    break;
                }
                if state.round_left() <= 0.0 {
                    end_game(transport, &mut state, EndReason::Timeout, None, None, &commitment).await;
                    break;
                }
                if state.turn_left() <= 0.0 {
                    let winner = state.turn.other();
                    if winner == Side::A {
                        state.score_a += settings.session.score_timeout_win;
                    }
                    end_game(transport, &mut state, EndReason::Timeout, Some(winner), None, &commitment).await;
                    break;
                }
            }

            frame = transport.recv() => {
                let Some(frame) = frame else { break };
                match frame {
                    InboundFrame::Chat { text } if state.turn == Side::A => {
                        let text: String = text.trim().chars().take(MAX_CHAT_CHARS).collect();
                        if text.is_empty() {
                            continue;
                        }
                        state.history.push(format!("A: {text}"));
                        conversation_log.record_message(correlation_id, "player", &text, now_ms());
                        message_count += 1;

                        let style = imitation_mood::analyze_style(&text);
                        mood = imitation_mood::update_mood(mood, style, 0.3);
                        state.swap_turn(settings.session.turn_limit_secs);

                        if state.ended {
                            continue;
                        }

                        let _ = transport.send(&OutboundFrame::Typing { who: "B", on: true }).await;

                        let pre = rand::thread_rng().gen_range(settings.humanize.min_delay..=settings.humanize.max_delay);
                        let pre = pre.min((state.turn_left() - 5.0).max(0.0));
                        if pre > 0.0 {
                            tokio::time::sleep(Duration::from_secs_f64(pre)).await;
                        }

                        let reply = imitation_bot::ai_reply(
                            &state.recent_history(imitation_core::config::HISTORY_PROMPT_TURNS),
                            &persona,
                            &settings.app_version,
                            Some(mood),
                            bot,
                            &settings.llm,
                        )
                        .await;

                        let post_cap = (state.turn_left() - 1.5).max(0.0).min(0.6);
                        if post_cap > 0.0 {
                            let post = rand::thread_rng().gen_range(0.1..=post_cap.max(0.1));
                            tokio::time::sleep(Duration::from_secs_f64(post)).await;
                        }

                        let _ = transport.send(&OutboundFrame::Typing { who: "B", on: false }).await;
                        state.history.push(format!("B: {reply}"));
                        conversation_log.record_message(correlation_id, "opponent", &reply, now_ms());
                        message_count += 1;
                        if !transport.send(&OutboundFrame::Chat { from_: "B", text: reply }).await {
                            break;
                        }
                        state.swap_turn(settings.session.turn_limit_secs);
                    }
                    InboundFrame::Chat { .. } => {}
                    InboundFrame::Guess { guess } => {
                        let correct = guess.to_uppercase() == "AI";
                        let delta = if correct { settings.session.score_correct } else { settings.session.score_wrong };
                        state.score_a += delta;
                        end_game(transport, &mut state, EndReason::Guess, None, Some(correct), &commitment).await;
                        break;
                    }
                    InboundFrame::State => {
                        let _ = transport
                            .send(&OutboundFrame::State {
                                opponent: "AI",
                                round_left: state.round_left(),
                                turn_left: state.turn_left(),
                                turn: state.turn.as_str(),
                            })
                            .await;
                    }
                }
            }
        }
    }

    conversation_log.record_summary(
        correlation_id,
        "AI",
        Some(&persona.name),
        None,
        message_count,
        start.elapsed().as_secs_f64(),
    );
}

async fn end_game<T: Transport>(
    transport: &mut T,
    state: &mut RoundState,
    reason: EndReason,
    winner: Option<Side>,
    correct: Option<bool>,
    commitment: &Commitment,
) {
    state.ended = true;
    let _ = transport
        .send(&OutboundFrame::End {
            reason,
            winner: winner.map(|s| s.as_str()),
            correct,
            score_delta: state.score_a,
            reveal: reveal_from(commitment),
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
            self.inbox.pop_front()
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
            humanize: imitation_core::config::HumanizeSettings {
                typo_rate: 0.0,
                max_typos: 0,
                min_delay: 0.0,
                max_delay: 0.01,
            },
            llm: imitation_core::config::LlmSettings {
                max_words: 12,
                temperature: 0.7,
                timeout_seconds: 2,
                model: "test".to_string(),
                base_url: None,
                api_key: None,
            },
            app_version: "test-1.0".to_string(),
        }
    }

    #[tokio::test]
    async fn an_immediate_guess_ends_the_session_without_a_bot_turn() {
        let mut transport = FakeTransport::with_inbox(vec![InboundFrame::Guess { guess: "AI".to_string() }]);
        let commitment = imitation_commit::new_commitment(OpponentType::Ai);
        let persona = imitation_persona::generate("seed-a", None);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);

        run_a_vs_bot(&mut transport, commitment, persona, &settings, None, &log, "corr-1").await;

        assert!(matches!(transport.sent.first(), Some(OutboundFrame::MatchStart { .. })));
        assert!(matches!(transport.sent.last(), Some(OutboundFrame::End { correct: Some(true), .. })));
    }

    #[tokio::test]
    async fn a_chat_turn_with_no_provider_still_produces_a_reply() {
        let mut transport = FakeTransport::with_inbox(vec![
            InboundFrame::Chat { text: "hey there, how are you?".to_string() },
            InboundFrame::Guess { guess: "HUMAN".to_string() },
        ]);
        let commitment = imitation_commit::new_commitment(OpponentType::Ai);
        let persona = imitation_persona::generate("seed-b", None);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);

        run_a_vs_bot(&mut transport, commitment, persona, &settings, None, &log, "corr-2").await;

        let saw_reply = transport
            .sent
            .iter()
            .any(|f| matches!(f, OutboundFrame::Chat { from_: "B", .. }));
        assert!(saw_reply, "expected a bot reply chat frame, got {:?}", transport.sent);
    }

    #[tokio::test]
    async fn a_dead_transport_ends_the_loop_without_panicking() {
        struct DeadTransport;

        #[async_trait]
        impl Transport for DeadTransport {
            async fn send(&mut self, _frame: &OutboundFrame) -> bool {
                false
            }

            async fn recv(&mut self) -> Option<InboundFrame> {
                None
            }
        }

        let mut transport = DeadTransport;
        let commitment = imitation_commit::new_commitment(OpponentType::Ai);
        let persona = imitation_persona::generate("seed-c", None);
        let settings = test_settings();
        let log = ConversationLogSink::new(None);

        run_a_vs_bot(&mut transport, commitment, persona, &settings, None, &log, "corr-3").await;
    }
}
