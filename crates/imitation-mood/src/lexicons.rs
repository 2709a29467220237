//! Keyword/phrase/emoji lexicons used by `analyze_style`. All constant, all
//! lowercase where matching is done against a lowercased message.

pub const AGGRESSIVE_KEYWORDS: &[&str] = &[
    "fuck", "shit", "damn", "wtf", "stfu", "idiot", "stupid", "dumb", "moron", "shut up", "piss",
    "asshole", "bitch", "hell", "crap", "suck", "hate", "annoying", "ridiculous", "pathetic",
    "waste", "useless",
];

pub const EMOTIONAL_KEYWORDS: &[&str] = &[
    "feel", "felt", "feeling", "emotion", "sad", "happy", "excited", "angry", "frustrated",
    "love", "hate", "miss", "worried", "anxious", "scared", "nervous", "glad", "sorry", "hurt",
    "disappointed", "proud", "ashamed", "grateful", "hope", "wish", "care", "matter",
];

pub const EMOTIONAL_PHRASES: &[&str] = &[
    "i feel",
    "i'm so",
    "i am so",
    "this makes me",
    "makes me feel",
    "i'm really",
    "i am really",
    "it hurts",
    "i can't believe",
    "i'm sad",
    "i'm happy",
    "i'm excited",
    "i'm worried",
];

pub const LOGICAL_KEYWORDS: &[&str] = &[
    "therefore",
    "thus",
    "hence",
    "because",
    "since",
    "if",
    "then",
    "logically",
    "logic",
    "rational",
    "reason",
    "evidence",
    "proof",
    "consistent",
    "inconsistent",
    "contradict",
    "implies",
    "assume",
    "fact",
    "data",
    "analysis",
    "objective",
    "subjective",
    "argument",
];

pub const EMOTIONAL_EMOJIS: &[&str] = &[
    "😂", "😭", "😡", "🥹", "❤️", "💔", "😢", "😊", "😃", "😍", "😤", "😠",
];
