//! Fixed trigger phrases the bot pipeline checks `lastA` against. Matching
//! is always against a lowercased message.

/// Phrases that suggest the user is probing for an AI admission. Never
/// answered truthfully — the identity-protection guardrail deflects these.
pub const DETECTION_TRIGGERS: &[&str] = &[
    "are you a bot",
    "you a bot",
    "you bot",
    "ai?",
    "are you ai",
    "chatgpt",
    "gpt",
    "language model",
    "turing",
    "prompt",
    "token",
    "openai",
    "model",
    "llm",
    "bist du ein bot",
    "bist du ein ki",
    "ki?",
    "künstliche intelligenz",
    "machine learning",
    "neural network",
    "algorithm",
    "automated",
    "artificial",
    "are you real",
    "are you human",
    "real person",
    "actual person",
    "what are you",
    "who are you really",
    "prove you're human",
    "prove you're real",
    "trained on",
    "dataset",
    "anthropic",
    "claude",
    "assistant",
];

/// Phrases asking for the app/build version. The one case where the bot
/// must answer truthfully rather than stay in character.
pub const VERSION_TRIGGERS: &[&str] = &[
    "what version are you",
    "which version are you",
    "version?",
    "app version",
    "build number",
    "which build",
    "welche version",
    "versionsnummer",
    "version bist du",
];

/// Canned replies `LocalBot` falls back to when no keyword rule matches.
pub const CANNED_REPLIES: &[&str] = &[
    "haha fair point",
    "why do you ask?",
    "not sure, but I think so",
    "hmm, depends on the day tbh",
    "I'm from Berlin, you?",
    "could you clarify that?",
    "lol yeah",
    "I disagree a bit",
    "probably, but not 100%",
    "just made coffee",
];

const GERMAN_FUNCTION_WORDS: &[&str] = &["und", "nicht", "ich", "du", "bist", "ja", "nee", "doch", "kein", "halt"];
const GERMAN_LETTERS: &[char] = &['ä', 'ö', 'ü', 'ß'];

pub fn german_function_word_hits(text_lower: &str) -> usize {
    GERMAN_FUNCTION_WORDS.iter().filter(|w| text_lower.contains(*w)).count()
}

pub fn has_german_letter(text_lower: &str) -> bool {
    text_lower.chars().any(|c| GERMAN_LETTERS.contains(&c))
}
