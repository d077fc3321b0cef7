//! Game and narration configuration.
//!
//! - `GameConfig`: rule knobs (round counts, vote noise, tie-break bias,
//!   speech length bounds). Defaults reproduce the standard 5-player game.
//!   May be overridden from a TOML file.
//! - `NarrationConfig`: connection settings for a live text backend,
//!   read from the environment (optionally seeded from a `.env` file).
//!
//! Player and faction counts are not configurable; see `core::player`.

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rule configuration for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Report sub-rounds before each vote.
    pub reports_per_vote: u8,

    /// Voting rounds before the forced decision.
    pub vote_rounds: u8,

    /// Chance that a voter ignores suspicion and votes at random.
    pub random_vote_rate: f64,

    /// In a tie between factions, chance the ejected player is a Crewmate.
    pub tie_break_crewmate_rate: f64,

    /// Chance that a defense accuser is drawn from the opposing faction.
    pub accusation_bias: f64,

    /// Accepted report length, in characters.
    pub report_min_chars: usize,
    pub report_max_chars: usize,

    /// Accepted defense length, in characters.
    pub defense_min_chars: usize,
    pub defense_max_chars: usize,

    /// Attempts against the text source before falling back to canned text.
    pub narration_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reports_per_vote: 2,
            vote_rounds: 2,
            random_vote_rate: 0.05,
            tie_break_crewmate_rate: 0.6,
            accusation_bias: 0.6,
            report_min_chars: 12,
            report_max_chars: 90,
            defense_min_chars: 25,
            defense_max_chars: 160,
            narration_attempts: 3,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check ranges and bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("random_vote_rate", self.random_vote_rate),
            ("tie_break_crewmate_rate", self.tie_break_crewmate_rate),
            ("accusation_bias", self.accusation_bias),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a probability"),
                });
            }
        }
        if self.reports_per_vote == 0 {
            return Err(ConfigError::Invalid {
                field: "reports_per_vote",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.vote_rounds == 0 {
            return Err(ConfigError::Invalid {
                field: "vote_rounds",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.report_min_chars > self.report_max_chars {
            return Err(ConfigError::Invalid {
                field: "report_min_chars",
                reason: format!("{} exceeds report_max_chars", self.report_min_chars),
            });
        }
        if self.defense_min_chars > self.defense_max_chars {
            return Err(ConfigError::Invalid {
                field: "defense_min_chars",
                reason: format!("{} exceeds defense_max_chars", self.defense_min_chars),
            });
        }
        if self.narration_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "narration_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn report_len(&self) -> RangeInclusive<usize> {
        self.report_min_chars..=self.report_max_chars
    }

    #[must_use]
    pub fn defense_len(&self) -> RangeInclusive<usize> {
        self.defense_min_chars..=self.defense_max_chars
    }

    #[must_use]
    pub fn with_random_vote_rate(mut self, rate: f64) -> Self {
        self.random_vote_rate = rate;
        self
    }

    #[must_use]
    pub fn with_tie_break_crewmate_rate(mut self, rate: f64) -> Self {
        self.tie_break_crewmate_rate = rate;
        self
    }

    #[must_use]
    pub fn with_accusation_bias(mut self, bias: f64) -> Self {
        self.accusation_bias = bias;
        self
    }

    #[must_use]
    pub fn with_narration_attempts(mut self, attempts: u32) -> Self {
        self.narration_attempts = attempts;
        self
    }
}

/// Live text backend settings.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrationConfig {
    pub base_url: String,
    /// Empty means no live backend; canned narration is used.
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            temperature: 0.8,
            max_tokens: 150,
            timeout: Duration::from_secs(20),
        }
    }
}

impl NarrationConfig {
    /// Environment file read by `from_env` when present.
    pub const ENV_FILE: &'static str = "DEEPSEEK_API_KEY.env";

    /// Build from environment variables.
    ///
    /// Loads `ENV_FILE` from the working directory first if it exists;
    /// variables already set in the process win. Unparseable numeric
    /// values fall back to the default with a warning.
    pub fn from_env() -> Self {
        match dotenvy::from_filename(Self::ENV_FILE) {
            Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("could not read {}: {e}", Self::ENV_FILE),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let temperature = parse_or(&lookup, "SPACE_WEREWOLF_TEMPERATURE", defaults.temperature);
        let max_tokens = parse_or(&lookup, "SPACE_WEREWOLF_MAX_TOKENS", defaults.max_tokens);

        Self {
            base_url: lookup("DEEPSEEK_BASE_URL").unwrap_or(defaults.base_url),
            api_key: lookup("DEEPSEEK_API_KEY").unwrap_or_default(),
            model: lookup("DEEPSEEK_MODEL").unwrap_or(defaults.model),
            temperature,
            max_tokens,
            timeout: defaults.timeout,
        }
    }

    /// Whether a live backend can be attempted.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn parse_or<T: std::str::FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            default
        }),
        None => default,
    }
}
