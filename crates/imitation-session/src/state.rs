use imitation_core::clock::Deadline;
use imitation_core::types::Side;

/// Mutable state shared by a session's single processor. Per the
/// single-writer rule, only the driver loop ever touches this directly.
pub struct RoundState {
    pub round_deadline: Deadline,
    pub turn_deadline: Deadline,
    pub turn: Side,
    pub history: Vec<String>,
    pub score_a: i64,
    pub score_b: i64,
    pub ended: bool,
}

impl RoundState {
    pub fn new(round_limit_secs: f64, turn_limit_secs: f64) -> Self {
        Self {
            round_deadline: Deadline::after_secs(round_limit_secs),
            turn_deadline: Deadline::after_secs(turn_limit_secs),
            turn: Side::A,
            history: Vec::new(),
            score_a: 0,
            score_b: 0,
            ended: false,
        }
    }

    pub fn swap_turn(&mut self, turn_limit_secs: f64) {
        self.turn = self.turn.other();
        self.turn_deadline = Deadline::after_secs(turn_limit_secs);
    }

    pub fn round_left(&self) -> f64 {
        self.round_deadline.time_left_secs()
    }

    pub fn turn_left(&self) -> f64 {
        self.turn_deadline.time_left_secs()
    }

    pub fn recent_history(&self, turns: usize) -> Vec<String> {
        let start = self.history.len().saturating_sub(turns);
        self.history[start..].to_vec()
    }
}
