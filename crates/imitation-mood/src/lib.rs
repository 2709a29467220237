mod lexicons;

pub use lexicons::AGGRESSIVE_KEYWORDS;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn excessive_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[!?]{2,}").unwrap())
}

fn list_pattern_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*[\d\-*]\s*[.)]?\s+").unwrap())
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// The AI side's running conversational disposition. `aggressiveness` is
/// signed (tense vs. relaxed); the other three are one-sided intensities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodState {
    pub aggressiveness: f64,
    pub empathy: f64,
    pub playfulness: f64,
    pub analytical: f64,
}

impl Default for MoodState {
    fn default() -> Self {
        MoodState {
            aggressiveness: 0.0,
            empathy: 0.0,
            playfulness: 0.0,
            analytical: 0.0,
        }
    }
}

impl MoodState {
    pub fn new(aggressiveness: f64, empathy: f64, playfulness: f64, analytical: f64) -> Self {
        MoodState {
            aggressiveness: clamp(aggressiveness, -1.0, 1.0),
            empathy: clamp(empathy, 0.0, 1.0),
            playfulness: clamp(playfulness, 0.0, 1.0),
            analytical: clamp(analytical, 0.0, 1.0),
        }
    }
}

/// Per-message style read, each field normalized to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleScores {
    pub aggressive: f64,
    pub emotional: f64,
    pub logical: f64,
}

/// `AnalyzeStyle(message) -> StyleScores`. Looks only at the latest user
/// message; no history is consulted here.
pub fn analyze_style(message: &str) -> StyleScores {
    if message.is_empty() {
        return StyleScores {
            aggressive: 0.0,
            emotional: 0.0,
            logical: 0.0,
        };
    }

    let message_lower = message.to_lowercase();
    let words: Vec<&str> = message.split_whitespace().collect();
    let message_length = message.split_whitespace().count();

    // aggressive
    let mut aggressive = 0.0;
    let aggressive_count = lexicons::AGGRESSIVE_KEYWORDS
        .iter()
        .filter(|w| message_lower.contains(*w))
        .count();
    aggressive += (aggressive_count as f64 * 0.3).min(1.0);

    if message_length > 3 {
        let caps_words = words
            .iter()
            .filter(|w| w.chars().any(|c| c.is_alphabetic()) && w.chars().all(|c| !c.is_lowercase()) && w.chars().count() > 2)
            .count();
        let caps_ratio = caps_words as f64 / message_length as f64;
        aggressive += (caps_ratio * 2.0).min(0.5);
    }

    let excessive_punct = excessive_punct_re().find_iter(message).count();
    aggressive += (excessive_punct as f64 * 0.2).min(0.4);

    let aggressive = aggressive.min(1.0);

    // emotional
    let mut emotional = 0.0;
    let padded = format!(" {} ", message_lower);
    let emotional_count = lexicons::EMOTIONAL_KEYWORDS
        .iter()
        .filter(|w| padded.contains(&format!(" {} ", w)))
        .count();
    emotional += (emotional_count as f64 * 0.15).min(0.6);

    let phrase_count = lexicons::EMOTIONAL_PHRASES
        .iter()
        .filter(|p| message_lower.contains(*p))
        .count();
    emotional += (phrase_count as f64 * 0.25).min(0.5);

    let emoji_count = lexicons::EMOTIONAL_EMOJIS
        .iter()
        .filter(|e| message.contains(*e))
        .count();
    emotional += (emoji_count as f64 * 0.2).min(0.4);

    let emotional = emotional.min(1.0);

    // logical
    let mut logical = 0.0;
    let logical_count = lexicons::LOGICAL_KEYWORDS
        .iter()
        .filter(|w| message_lower.contains(*w))
        .count();
    logical += (logical_count as f64 * 0.2).min(0.7);

    let list_patterns = list_pattern_re().find_iter(message).count();
    logical += (list_patterns as f64 * 0.2).min(0.4);

    if message_lower.contains("if ") && (message_lower.contains("then") || message_lower.contains(',')) {
        logical += 0.3;
    }

    let logical = logical.min(1.0);

    StyleScores {
        aggressive,
        emotional,
        logical,
    }
}

/// `UpdateMood(mood, style, alpha=0.3) -> mood'`. Exponential moving average
/// per field, each driven by its own target formula.
pub fn update_mood(mood: MoodState, style: StyleScores, alpha: f64) -> MoodState {
    let alpha = clamp(alpha, 0.0, 1.0);

    let target_aggression = style.aggressive - 0.2;
    let new_aggressiveness = mood.aggressiveness * (1.0 - alpha) + target_aggression * alpha;

    let base_empathy = style.emotional * 0.8 + (1.0 - style.aggressive) * 0.2;
    let new_empathy = mood.empathy * (1.0 - alpha) + base_empathy * alpha;

    let base_playfulness = style.emotional * (1.0 - style.aggressive) * 0.7;
    let new_playfulness = mood.playfulness * (1.0 - alpha) + base_playfulness * alpha;

    let new_analytical = mood.analytical * (1.0 - alpha) + style.logical * alpha;

    MoodState::new(new_aggressiveness, new_empathy, new_playfulness, new_analytical)
}

/// `BuildMoodInstructions(mood) -> text`. Empty string when no threshold
/// fires, so a neutral mood adds nothing to the prompt.
pub fn build_mood_instructions(mood: MoodState) -> String {
    let mut instructions: Vec<&str> = Vec::new();

    if mood.aggressiveness > 0.4 {
        instructions.push(
            "You feel slightly defensive. Respond with subtle sarcasm or dry humor, \
             but stay calm and never be toxic or hostile. Keep it light and human.",
        );
    } else if mood.aggressiveness < -0.3 {
        instructions.push("You're feeling very relaxed and calm. Be extra chill and easygoing in your responses.");
    }

    if mood.empathy > 0.5 {
        instructions.push(
            "You're warm and empathetic. Acknowledge and validate their feelings. \
             Show you understand where they're coming from.",
        );
    }

    if mood.analytical > 0.5 {
        instructions.push(
            "You're thinking analytically. Be more precise and logical in your responses. \
             Focus on clear reasoning and structure your thoughts.",
        );
    }

    if mood.playfulness > 0.5 {
        instructions.push(
            "You're feeling playful and teasing. Add some light humor or playful banter, \
             but stay natural and don't overdo it.",
        );
    }

    instructions.join(" ")
}

/// Generation-parameter triple a caller feeds into the reply pipeline and
/// into `imitation_humanize::humanize`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    pub temperature: f64,
    pub max_words: u32,
    pub typo_rate: f64,
}

/// `GenParams(mood, base_temperature, base_max_words) -> GenParams`.
/// Additive per-field adjustments gated by their own thresholds, clamped at
/// the end to the safe ranges the rest of the system assumes.
pub fn gen_params(mood: MoodState, base_temperature: f64, base_max_words: u32) -> GenParams {
    let mut temperature = base_temperature;
    let mut max_words = base_max_words as i64;
    let mut typo_rate = 0.22;

    if mood.analytical > 0.3 {
        temperature -= mood.analytical * 0.3;
        max_words += (mood.analytical * 6.0) as i64;
        typo_rate -= mood.analytical * 0.1;
    }

    if mood.playfulness > 0.3 {
        temperature += mood.playfulness * 0.4;
        typo_rate += mood.playfulness * 0.15;
    }

    if mood.aggressiveness > 0.4 {
        max_words -= (mood.aggressiveness * 4.0) as i64;
        temperature += mood.aggressiveness * 0.2;
    } else if mood.aggressiveness < -0.3 {
        max_words += 2;
        temperature -= 0.1;
    }

    if mood.empathy > 0.5 {
        max_words += 3;
        typo_rate -= 0.05;
    }

    let temperature = (clamp(temperature, 0.2, 1.5) * 100.0).round() / 100.0;
    let max_words = max_words.clamp(8, 30) as u32;
    let typo_rate = (clamp(typo_rate, 0.0, 0.5) * 1000.0).round() / 1000.0;

    GenParams {
        temperature,
        max_words,
        typo_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_yields_zero_style() {
        let s = analyze_style("");
        assert_eq!(s.aggressive, 0.0);
        assert_eq!(s.emotional, 0.0);
        assert_eq!(s.logical, 0.0);
    }

    #[test]
    fn aggressive_keywords_and_caps_raise_aggression() {
        let s = analyze_style("YOU ARE SO STUPID AND DUMB!!");
        assert!(s.aggressive > 0.5);
    }

    #[test]
    fn emotional_phrase_and_emoji_raise_emotional_score() {
        let s = analyze_style("i feel so sad today 😢");
        assert!(s.emotional > 0.3);
    }

    #[test]
    fn logical_keywords_and_if_then_raise_logical_score() {
        let s = analyze_style("if the data is consistent then the argument holds, therefore it's a fact");
        assert!(s.logical > 0.5);
    }

    #[test]
    fn update_mood_moves_toward_target_not_instantly() {
        let base = MoodState::default();
        let style = StyleScores {
            aggressive: 1.0,
            emotional: 0.0,
            logical: 0.0,
        };
        let updated = update_mood(base, style, 0.3);
        assert!(updated.aggressiveness > 0.0 && updated.aggressiveness < 1.0);
    }

    #[test]
    fn mood_state_fields_stay_clamped() {
        let m = MoodState::new(5.0, 5.0, -5.0, 5.0);
        assert_eq!(m.aggressiveness, 1.0);
        assert_eq!(m.empathy, 1.0);
        assert_eq!(m.playfulness, 0.0);
        assert_eq!(m.analytical, 1.0);
    }

    #[test]
    fn neutral_mood_yields_no_instructions() {
        assert_eq!(build_mood_instructions(MoodState::default()), "");
    }

    #[test]
    fn high_aggressiveness_triggers_defensive_instruction() {
        let m = MoodState::new(0.6, 0.0, 0.0, 0.0);
        assert!(build_mood_instructions(m).contains("defensive"));
    }

    #[test]
    fn gen_params_stay_within_documented_bounds() {
        for agg in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            for emp in [0.0, 0.5, 1.0] {
                for play in [0.0, 0.5, 1.0] {
                    for ana in [0.0, 0.5, 1.0] {
                        let m = MoodState::new(agg, emp, play, ana);
                        let p = gen_params(m, 0.7, 12);
                        assert!(p.temperature >= 0.2 && p.temperature <= 1.5);
                        assert!(p.max_words >= 8 && p.max_words <= 30);
                        assert!(p.typo_rate >= 0.0 && p.typo_rate <= 0.5);
                    }
                }
            }
        }
    }

    #[test]
    fn analytical_mood_lowers_temperature_and_typo_rate() {
        let neutral = gen_params(MoodState::default(), 0.7, 12);
        let analytical = gen_params(MoodState::new(0.0, 0.0, 0.0, 0.9), 0.7, 12);
        assert!(analytical.temperature < neutral.temperature);
        assert!(analytical.typo_rate < neutral.typo_rate);
    }
}
