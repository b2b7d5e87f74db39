/// Facade configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All input context options from `libhangul_core::Config` (flattened via serde)
/// - Hanja lookup cache size
/// - Extra keyboard layout files to register next to the built-in ones
///
/// # Example
///
/// ```rust
/// use libhangul::HangulConfig;
///
/// let config = HangulConfig::from_toml_str("idiomatic_input = true\nhanja_cache_size = 64\n").unwrap();
/// assert!(config.base().idiomatic_input);
/// assert_eq!(config.hanja_cache_size, 64);
/// ```
use libhangul_core::{Config, HangulError, Keyboard, KeyboardRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HangulConfig {
    /// Input context options (buffer size, output mode, idiomatic input, ...)
    #[serde(flatten)]
    pub base: Config,

    /// Entries kept in the Hanja lookup cache.
    pub hanja_cache_size: usize,

    /// JSON layout files registered in addition to "2" and "3".
    pub keyboard_files: Vec<PathBuf>,
}

impl Default for HangulConfig {
    fn default() -> Self {
        Self {
            base: Config::default(),
            hanja_cache_size: 256,
            keyboard_files: Vec::new(),
        }
    }
}

impl HangulConfig {
    /// Convert this config into the base config for `InputContext::with_config`.
    pub fn into_base(self) -> Config {
        self.base
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load and validate a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.base.validate()?;
        Ok(config)
    }

    /// Built-in layouts plus every file in `keyboard_files`.
    pub fn build_registry(&self) -> Result<KeyboardRegistry, HangulError> {
        let mut registry = KeyboardRegistry::with_builtin();
        for path in &self.keyboard_files {
            let content = std::fs::read_to_string(path).map_err(|e| {
                HangulError::Layout(format!("{}: {}", path.display(), e))
            })?;
            let keyboard = Keyboard::from_json(&content)?;
            tracing::debug!(id = keyboard.id(), path = %path.display(), "registered keyboard");
            registry.register(keyboard);
        }
        Ok(registry)
    }
}
