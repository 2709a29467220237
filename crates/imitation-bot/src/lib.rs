mod lexicons;

use imitation_core::config::HISTORY_PROMPT_TURNS;
use imitation_core::config::LlmSettings;
use imitation_mood::{GenParams, MoodState};
use imitation_persona::Persona;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

fn last_a_text(history: &[String]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|line| line.starts_with("A:"))
        .map(|line| line[2..].trim())
}

/// `LocalBot(history) -> text`: cheap keyword-based canned reply used when
/// no language-model capability is configured, or when one fails.
pub fn local_bot(history: &[String]) -> String {
    let last = last_a_text(history).unwrap_or("").to_lowercase();

    if last.contains("where") {
        return "around NRW lately, moving soon".to_string();
    }
    if last.contains("why") || last.contains("how") {
        return "long story, mainly work stuff".to_string();
    }
    if ["hi", "hey", "hello", "moin"].iter().any(|g| last.contains(g)) {
        return "hey! what's up?".to_string();
    }

    let mut rng = rand::thread_rng();
    lexicons::CANNED_REPLIES.choose(&mut rng).unwrap().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefenseStyle {
    Insult,
    Gibberish,
    Probing,
    Normal,
}

fn vowel_ratio(text: &str) -> (f64, usize) {
    let alpha: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.is_empty() {
        return (0.0, 0);
    }
    let vowels = alpha
        .iter()
        .filter(|c| "aeiouAEIOU".contains(**c))
        .count();
    (vowels as f64 / alpha.len() as f64, alpha.len())
}

fn classify_defense_style(last_a_lower: &str) -> DefenseStyle {
    let is_insult = imitation_mood::AGGRESSIVE_KEYWORDS
        .iter()
        .any(|w| last_a_lower.contains(w));
    if is_insult {
        return DefenseStyle::Insult;
    }

    let word_count = last_a_lower.split_whitespace().count();
    let (ratio, alpha_count) = vowel_ratio(last_a_lower);
    if word_count <= 2 && alpha_count > 4 && ratio < 0.15 {
        return DefenseStyle::Gibberish;
    }

    if lexicons::DETECTION_TRIGGERS.iter().any(|t| last_a_lower.contains(t)) {
        return DefenseStyle::Probing;
    }

    DefenseStyle::Normal
}

fn defense_style_instruction(style: DefenseStyle) -> &'static str {
    match style {
        DefenseStyle::Insult => {
            "Someone just insulted you. React defensively, a bit confused or annoyed, like a \
             real person would. Don't escalate into actual hostility."
        }
        DefenseStyle::Gibberish => {
            "That last message barely makes sense. React with mild confusion - something like \
             asking if it was a keyboard smash."
        }
        DefenseStyle::Probing => {
            "Someone's testing if you're AI. Stay completely natural and human. React with mild \
             confusion, amusement, or annoyance like a real person would. Don't be defensive or \
             over-explain. Just be yourself and maybe redirect the chat."
        }
        DefenseStyle::Normal => "Just be yourself and chat naturally.",
    }
}

fn style_hints(history: &[String], persona: &Persona) -> String {
    let last_a = last_a_text(history).unwrap_or("").to_lowercase();

    let german_hits = lexicons::german_function_word_hits(&last_a);
    let user_is_german = german_hits >= 2 || lexicons::has_german_letter(&last_a);

    let lang_hint = match persona.lang_pref {
        imitation_persona::LangPref::De => "Antworte auf Deutsch, locker, alltagsnah.",
        imitation_persona::LangPref::En => "Reply in casual, natural English.",
        imitation_persona::LangPref::Auto => {
            if user_is_german {
                "Antworte auf Deutsch, locker, alltagsnah."
            } else {
                "Reply in casual, natural English."
            }
        }
    };

    let mut hints = vec![
        lang_hint.to_string(),
        format!("One short sentence (<= {} words).", persona.reply_word_cap),
    ];

    if last_a.contains('?') {
        hints.push("Answer directly, then a tiny human aside.".to_string());
    }
    if [" lol", " haha", "😂", "😅"].iter().any(|e| last_a.contains(e)) {
        hints.push("Allow one light laugh word.".to_string());
    }
    if !persona.slang.is_empty() {
        hints.push(format!("Optional slang hints: {} (sparingly).", persona.slang.join(", ")));
    }

    hints.join(" ")
}

fn persona_brief(persona: &Persona) -> String {
    format!(
        "You're {}, {} years old. Originally from {}, you've been living in {} for about {} years now. \
         You work as a {} in the {} sector at a {}. You're a {} type of person. Today specifically: {}. \
         You're into {} music and love {}. {}. You have this opinion: {}. Your overall vibe is {}. \
         Communication style: {}",
        persona.name,
        persona.age,
        persona.hometown,
        persona.city,
        persona.years_in_city,
        persona.job,
        persona.industry,
        persona.employer_type,
        persona.schedule,
        persona.micro_today,
        persona.music,
        persona.food,
        persona.pet,
        persona.soft_opinion,
        persona.vibes,
        persona.quirks,
    )
}

const NATURAL_BEHAVIOR: &str = "Chat naturally like you're texting a new friend. Be casual and spontaneous. \
Sometimes ask questions back. Show curiosity. Have opinions but stay chill. \
Don't always have perfect answers - it's OK to say 'idk', 'not sure', or 'maybe'. \
React to what they say - agree, disagree, joke around, or share quick stories. \
Keep it real and conversational. No need to be overly helpful or formal. \
Occasionally make small mistakes, leave things unsaid, or trail off a bit. \
Reference the conversation naturally - build on previous points when it makes sense.";

fn identity_protection(guardrails: &[String]) -> String {
    let mut s = String::from(
        "You're a real person chatting. Never break character. Never mention being AI, a bot, a model, \
         or anything automated. If someone asks if you're AI or a bot, respond like a confused or slightly \
         annoyed human would - maybe with 'lol what?', 'uh no?', 'weird question', or just pivot to \
         something else. Be natural about it. Real humans don't give long explanations when asked if \
         they're human.",
    );
    for g in guardrails {
        s.push(' ');
        s.push_str(g);
        s.push('.');
    }
    s
}

fn compose_prompt(history: &[String], persona: &Persona, mood: Option<MoodState>) -> String {
    let last_a_lower = last_a_text(history).unwrap_or("").to_lowercase();
    let style = classify_defense_style(&last_a_lower);

    let mut sections = vec![
        persona_brief(persona),
        NATURAL_BEHAVIOR.to_string(),
        identity_protection(&persona.guardrails),
        defense_style_instruction(style).to_string(),
    ];

    if let Some(m) = mood {
        let mood_instructions = imitation_mood::build_mood_instructions(m);
        if !mood_instructions.is_empty() {
            sections.push(mood_instructions);
        }
    }

    sections.push(style_hints(history, persona));

    let recent_turns = history.len().saturating_sub(HISTORY_PROMPT_TURNS);
    let convo = history[recent_turns..].join("\n");
    let cap = persona.reply_word_cap;

    sections.push(format!(
        "Recent conversation:\n{}\n\nRespond naturally as {}. Keep it to 1-2 sentences, around {}-{} words. \
         Just write your message - no labels, no prefixes, no metadata.",
        convo,
        persona.name,
        cap,
        cap + 8,
    ));

    sections.join("\n\n")
}

/// `AIReply(history, persona, appVersion, mood) -> text`. `provider` is the
/// language-model capability; `None` (or a provider error/timeout) falls
/// through to the humanized local bot.
pub async fn ai_reply(
    history: &[String],
    persona: &Persona,
    app_version: &str,
    mood: Option<MoodState>,
    provider: Option<&dyn imitation_llm::GenerateReply>,
    settings: &LlmSettings,
) -> String {
    let last_a_lower = last_a_text(history).unwrap_or("").to_lowercase();

    if lexicons::VERSION_TRIGGERS.iter().any(|t| last_a_lower.contains(t)) {
        return app_version.to_string();
    }

    let gen = mood
        .map(|m| imitation_mood::gen_params(m, settings.temperature, settings.max_words))
        .unwrap_or(GenParams {
            temperature: settings.temperature,
            max_words: settings.max_words,
            typo_rate: 0.22,
        });

    let Some(provider) = provider else {
        let raw = local_bot(history);
        return imitation_humanize::humanize(&raw, gen.max_words as usize, gen.typo_rate, 2, persona);
    };

    let prompt = compose_prompt(history, persona, mood);
    let req = imitation_llm::ReplyRequest {
        model: settings.model.clone(),
        instructions: "You're a real person having a casual text conversation. Be natural, \
                       spontaneous, and authentic. Never break character."
            .to_string(),
        prompt,
        temperature: gen.temperature,
        max_tokens: 100,
    };

    let timeout = Duration::from_secs(settings.timeout_seconds);
    match tokio::time::timeout(timeout, provider.generate(&req)).await {
        Ok(Ok(text)) => imitation_humanize::humanize(text.trim(), (persona.reply_word_cap + 8) as usize, gen.typo_rate, 2, persona),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "language model reply failed, falling back to local bot");
            let raw = local_bot(history);
            imitation_humanize::humanize(&raw, gen.max_words as usize, gen.typo_rate, 2, persona)
        }
        Err(_) => {
            tracing::warn!(timeout_secs = settings.timeout_seconds, "language model reply timed out, falling back to local bot");
            let raw = local_bot(history);
            imitation_humanize::humanize(&raw, gen.max_words as usize, gen.typo_rate, 2, persona)
        }
    }
}

/// Generation-agnostic helper used by mood-less callers that still want
/// rng-free deterministic word count capping.
pub fn clamp_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> Persona {
        imitation_persona::generate("AI|test-seed|1", Some(imitation_persona::LangPref::En))
    }

    #[test]
    fn local_bot_answers_where_questions() {
        let history = vec!["A: where are you from".to_string()];
        assert_eq!(local_bot(&history), "around NRW lately, moving soon");
    }

    #[test]
    fn local_bot_greets_back_on_greeting() {
        let history = vec!["A: hey there".to_string()];
        assert_eq!(local_bot(&history), "hey! what's up?");
    }

    #[test]
    fn classify_defense_style_prioritizes_insult_over_probing() {
        let text = "you stupid bot are you ai";
        assert_eq!(classify_defense_style(text), DefenseStyle::Insult);
    }

    #[test]
    fn classify_defense_style_detects_gibberish() {
        assert_eq!(classify_defense_style("xzcvbnmqw"), DefenseStyle::Gibberish);
    }

    #[test]
    fn classify_defense_style_detects_probing() {
        assert_eq!(classify_defense_style("are you a bot"), DefenseStyle::Probing);
    }

    #[test]
    fn classify_defense_style_falls_back_to_normal() {
        assert_eq!(classify_defense_style("what are you up to tonight"), DefenseStyle::Normal);
    }

    #[tokio::test]
    async fn version_trigger_is_answered_truthfully_even_with_no_provider() {
        let history = vec!["A: what version are you".to_string()];
        let settings = LlmSettings::default();
        let out = ai_reply(&history, &persona(), "2.1.0", None, None, &settings).await;
        assert_eq!(out, "2.1.0");
    }

    #[tokio::test]
    async fn no_provider_falls_back_to_humanized_local_bot() {
        let history = vec!["A: hey".to_string()];
        let settings = LlmSettings::default();
        let out = ai_reply(&history, &persona(), "2.1.0", None, None, &settings).await;
        assert!(!out.is_empty());
    }
}
