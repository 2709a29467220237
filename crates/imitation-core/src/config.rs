use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Session-wide constants that are not env-overridable — wire-protocol shape,
// not tuning knobs.
pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_CHAT_CHARS: usize = 280;
pub const HISTORY_PROMPT_TURNS: usize = 12;
pub const HUMANIZE_SLACK_WORDS: usize = 8;
pub const HUMANIZE_MAX_REPLY_CHARS: usize = 180;

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matchmaker: MatchmakerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub humanize: HumanizeSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchmakerSettings {
    #[serde(default = "MatchmakerSettings::default_h2h_prob")]
    pub h2h_prob: f64,
    #[serde(default = "MatchmakerSettings::default_match_window_secs")]
    pub match_window_secs: f64,
    #[serde(default = "MatchmakerSettings::default_bind_window_secs")]
    pub bind_window_secs: f64,
}

impl MatchmakerSettings {
    fn default_h2h_prob() -> f64 {
        0.5
    }
    fn default_match_window_secs() -> f64 {
        10.0
    }
    fn default_bind_window_secs() -> f64 {
        20.0
    }
}

impl Default for MatchmakerSettings {
    fn default() -> Self {
        Self {
            h2h_prob: Self::default_h2h_prob(),
            match_window_secs: Self::default_match_window_secs(),
            bind_window_secs: Self::default_bind_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "SessionSettings::default_round_limit_secs")]
    pub round_limit_secs: f64,
    #[serde(default = "SessionSettings::default_turn_limit_secs")]
    pub turn_limit_secs: f64,
    #[serde(default = "SessionSettings::default_score_correct")]
    pub score_correct: i64,
    #[serde(default = "SessionSettings::default_score_wrong")]
    pub score_wrong: i64,
    #[serde(default = "SessionSettings::default_score_timeout_win")]
    pub score_timeout_win: i64,
}

impl SessionSettings {
    fn default_round_limit_secs() -> f64 {
        300.0
    }
    fn default_turn_limit_secs() -> f64 {
        30.0
    }
    fn default_score_correct() -> i64 {
        100
    }
    fn default_score_wrong() -> i64 {
        -200
    }
    fn default_score_timeout_win() -> i64 {
        100
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            round_limit_secs: Self::default_round_limit_secs(),
            turn_limit_secs: Self::default_turn_limit_secs(),
            score_correct: Self::default_score_correct(),
            score_wrong: Self::default_score_wrong(),
            score_timeout_win: Self::default_score_timeout_win(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "LlmSettings::default_max_words")]
    pub max_words: u32,
    #[serde(default = "LlmSettings::default_temperature")]
    pub temperature: f64,
    #[serde(default = "LlmSettings::default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "LlmSettings::default_model")]
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl LlmSettings {
    fn default_max_words() -> u32 {
        12
    }
    fn default_temperature() -> f64 {
        0.7
    }
    fn default_timeout_seconds() -> u64 {
        8
    }
    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            max_words: Self::default_max_words(),
            temperature: Self::default_temperature(),
            timeout_seconds: Self::default_timeout_seconds(),
            model: Self::default_model(),
            base_url: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanizeSettings {
    #[serde(default = "HumanizeSettings::default_typo_rate")]
    pub typo_rate: f64,
    #[serde(default = "HumanizeSettings::default_max_typos")]
    pub max_typos: u32,
    #[serde(default = "HumanizeSettings::default_min_delay")]
    pub min_delay: f64,
    #[serde(default = "HumanizeSettings::default_max_delay")]
    pub max_delay: f64,
}

impl HumanizeSettings {
    fn default_typo_rate() -> f64 {
        0.22
    }
    fn default_max_typos() -> u32 {
        2
    }
    fn default_min_delay() -> f64 {
        0.6
    }
    fn default_max_delay() -> f64 {
        1.6
    }
}

impl Default for HumanizeSettings {
    fn default() -> Self {
        Self {
            typo_rate: Self::default_typo_rate(),
            max_typos: Self::default_max_typos(),
            min_delay: Self::default_min_delay(),
            max_delay: Self::default_max_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub conversation_log_dir: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            conversation_log_dir: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matchmaker: MatchmakerSettings::default(),
            session: SessionSettings::default(),
            llm: LlmSettings::default(),
            humanize: HumanizeSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    /// Load from compiled defaults, an optional TOML file, then
    /// `IMITATION_`-prefixed env vars. Each section is extracted
    /// independently so one malformed field falls back to its own default
    /// instead of aborting startup.
    pub fn load() -> Self {
        let config_path =
            std::env::var("IMITATION_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let figment = Figment::new()
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("IMITATION_").split("_"));

        Self {
            matchmaker: extract_section(&figment, "matchmaker"),
            session: extract_section(&figment, "session"),
            llm: extract_section(&figment, "llm"),
            humanize: extract_section(&figment, "humanize"),
            server: extract_section(&figment, "server"),
        }
    }
}

fn extract_section<T: serde::de::DeserializeOwned + Default>(figment: &Figment, key: &str) -> T {
    match figment.focus(key).extract() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(section = key, error = %e, "config section failed to parse, using defaults");
            T::default()
        }
    }
}
