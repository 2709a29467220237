mod qwerty;

use imitation_core::config::HUMANIZE_MAX_REPLY_CHARS;
use imitation_persona::Persona;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

fn repeated_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]{2,}").unwrap())
}

fn limit_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.trim().to_string()
    } else {
        words[..max_words].join(" ")
    }
}

fn swap_adjacent(chars: &mut Vec<char>, rng: &mut impl Rng) {
    if chars.len() < 4 {
        return;
    }
    let i = rng.gen_range(1..chars.len() - 1);
    if chars[i].is_alphabetic() && chars[i + 1].is_alphabetic() {
        chars.swap(i, i + 1);
    }
}

fn neighbor_replace(chars: &mut Vec<char>, rng: &mut impl Rng) {
    let idxs: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .collect();
    if idxs.is_empty() {
        return;
    }
    let i = idxs[rng.gen_range(0..idxs.len())];
    let was_upper = chars[i].is_uppercase();
    let lower = chars[i].to_ascii_lowercase();
    if let Some(options) = qwerty::neighbors(lower) {
        let mut rep = options[rng.gen_range(0..options.len())];
        if was_upper {
            rep = rep.to_ascii_uppercase();
        }
        chars[i] = rep;
    }
}

fn drop_random_char(chars: &mut Vec<char>, rng: &mut impl Rng) {
    let idxs: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .collect();
    if idxs.is_empty() {
        return;
    }
    let i = idxs[rng.gen_range(0..idxs.len())];
    chars.remove(i);
}

fn humanize_typos(text: &str, rate: f64, max_typos: u32, rng: &mut impl Rng) -> String {
    if text.is_empty() || rng.gen::<f64>() > rate {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    let n = rng.gen_range(1..=max_typos.max(1));
    for _ in 0..n {
        match rng.gen_range(0..3) {
            0 => swap_adjacent(&mut chars, rng),
            1 => neighbor_replace(&mut chars, rng),
            _ => drop_random_char(&mut chars, rng),
        }
    }
    let mut s: String = chars.into_iter().collect();
    if rng.gen::<f64>() < 0.25 {
        if let Some(first) = s.chars().next() {
            if first.is_alphabetic() {
                s = first.to_lowercase().collect::<String>() + &s[first.len_utf8()..];
            }
        }
    }
    s
}

/// `Humanize(text, persona) -> text'` — deterministic-on-input-modulo-RNG.
/// `max_words`/`typo_rate` mirror the generation-parameter pair a caller
/// derives from mood (`imitation_mood::GenParams`) or from the persona's own
/// defaults when no mood adjustment applies.
pub fn humanize(text: &str, max_words: usize, typo_rate: f64, max_typos: u32, persona: &Persona) -> String {
    let mut s = text.trim().to_string();
    s = repeated_punct_re().replace_all(&s, ".").to_string();
    s = s.replace('\n', " ");

    let cap = max_words.min(persona.reply_word_cap as usize);
    s = limit_words(&s, cap + imitation_core::config::HUMANIZE_SLACK_WORDS);
    if s.len() > HUMANIZE_MAX_REPLY_CHARS {
        s = s
            .chars()
            .take(HUMANIZE_MAX_REPLY_CHARS)
            .collect::<String>()
            .trim_end()
            .to_string();
    }

    let mut rng = rand::thread_rng();
    s = humanize_typos(&s, typo_rate, max_typos, &mut rng);

    if !persona.emoji_pool.is_empty() && rng.gen::<f64>() < persona.emoji_rate * 2.0 {
        let emoji = &persona.emoji_pool[rng.gen_range(0..persona.emoji_pool.len())];
        s = format!("{} {}", s, emoji).trim().to_string();
    }

    if rng.gen::<f64>() < 0.15 {
        if !persona.laughter.is_empty() && rng.gen::<f64>() < 0.5 {
            s = format!("{} {}", s, persona.laughter);
        } else if !persona.filler_words.is_empty() && rng.gen::<f64>() < 0.6 {
            let fw = &persona.filler_words[rng.gen_range(0..persona.filler_words.len())];
            if rng.gen::<f64>() < 0.5 {
                s = format!("{} {}", fw, s);
            } else {
                s = format!("{} {}", s, fw);
            }
        }
    }

    if rng.gen::<f64>() < 0.10 && s.ends_with('.') {
        s.pop();
    }

    if rng.gen::<f64>() < 0.05 {
        if let Some(first) = s.chars().next() {
            if first.is_uppercase() && !s.starts_with("I ") && !s.starts_with("I'") {
                s = first.to_lowercase().collect::<String>() + &s[first.len_utf8()..];
            }
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_persona() -> Persona {
        imitation_persona::generate("AI|seed|1", None)
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let persona = stub_persona();
        assert_eq!(humanize("", 12, 0.22, 2, &persona), "");
    }

    #[test]
    fn collapses_repeated_punctuation() {
        let persona = stub_persona();
        let out = humanize("wait what??!!", 30, 0.0, 2, &persona);
        assert!(!out.contains("??") && !out.contains("!!"));
    }

    #[test]
    fn result_never_exceeds_180_chars() {
        let persona = stub_persona();
        let long = "word ".repeat(200);
        for _ in 0..20 {
            let out = humanize(&long, 30, 0.22, 2, &persona);
            assert!(out.chars().count() <= 180);
        }
    }

    #[test]
    fn zero_typo_rate_never_mutates_letters() {
        let persona = stub_persona();
        let out = humanize("hello there friend", 30, 0.0, 2, &persona);
        assert!(out.to_lowercase().starts_with("hello there friend") || out.is_empty());
    }
}
