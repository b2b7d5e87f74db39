//! libhangul-core
//!
//! Incremental Hangul composition shared by the `libhangul` facade and its
//! tools. Key codes go in, committed syllables and a preedit come out.
//!
//! Layers, leaf first:
//! - `jamo` - classification and syllable arithmetic over code points
//! - `CompositionBuffer` - the syllable being typed, with combination rules
//! - `InputContext` - the keystroke state machine (commit queue, preedit,
//!   backspace, overflow, recovery)
//!
//! Around them sit the `KeyboardRegistry` (key code → jamo tables),
//! `Config` and a few normalization helpers.
use serde::{Deserialize, Serialize};

pub mod jamo;
pub use jamo::{
    classify, compose, decompose, from_compatibility_form, is_conjoinable,
    leading_to_trailing, to_compatibility_form, JamoClass, JamoUsage, SyllableParts,
};

mod tables;

pub mod buffer;
pub use buffer::CompositionBuffer;

pub mod error;
pub use error::HangulError;

pub mod keyboard;
pub use keyboard::{Keyboard, KeyboardRegistry};

pub mod input_context;
pub use input_context::{InputContext, KeyEvent, KeyOutcome, KEY_BACKSPACE, KEY_DELETE};

pub mod normalize;

/// Largest accepted `max_buffer_size`.
pub const MAX_BUFFER_LIMIT: usize = 1000;

/// What the engine emits for a composed syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Precomposed syllables (U+AC00..U+D7A3) whenever they can be built.
    #[default]
    Syllable,
    /// Conjoining jamo, never composed.
    Jamo,
}

/// Input context configuration.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Jamo held before the buffer auto-commits (1..=1000).
    pub max_buffer_size: usize,

    pub output_mode: OutputMode,

    /// Treat a consonant typed after a complete syllable as its trailing
    /// consonant, and move it to the next syllable if a vowel follows.
    /// This is how two-set keyboards are normally typed.
    pub idiomatic_input: bool,

    /// Let a leading consonant join a vowel typed before it.
    pub auto_reorder: bool,

    /// NFC-normalize each committed unit in syllable mode.
    pub force_nfc: bool,

    /// Strip characters that are unsafe in file names from committed text.
    pub filename_compatibility: bool,

    /// Reset the context when an internal inconsistency is detected.
    pub auto_error_recovery: bool,

    /// Keyboard selected when a context is created.
    pub default_keyboard: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_buffer_size: 12,
            output_mode: OutputMode::Syllable,
            idiomatic_input: false,
            auto_reorder: true,
            force_nfc: true,
            filename_compatibility: false,
            auto_error_recovery: true,
            default_keyboard: "2".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), HangulError> {
        validate_buffer_size(self.max_buffer_size)?;
        if self.default_keyboard.is_empty() {
            return Err(HangulError::InvalidConfiguration(
                "default_keyboard must not be empty".into(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_buffer_size(size: usize) -> Result<(), HangulError> {
    if (1..=MAX_BUFFER_LIMIT).contains(&size) {
        Ok(())
    } else {
        Err(HangulError::InvalidConfiguration(format!(
            "max_buffer_size must be within 1..={}, got {}",
            MAX_BUFFER_LIMIT, size
        )))
    }
}
