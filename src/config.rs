//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Initial presentation state.
    pub ui: UiCfg,
    /// Cosmetic timer constants.
    pub timing: TimingCfg,
    /// Search-grounded text service used by the legal pages.
    pub grounding: GroundingCfg,
}

/// Startup values for the presentation flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiCfg {
    /// Locale used for string lookup.
    pub locale: String,
    /// Start in the dark palette.
    pub dark_mode: bool,
    /// Avatar shown in settings until the user picks another one.
    pub avatar_url: String,
}

/// Durations and step sizes for the simulated progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingCfg {
    /// Delay before the splash screen hands over to the library.
    pub splash_ms: u64,
    /// Simulated avatar generation time.
    pub generation_ms: u64,
    /// Upper bound of the random start delay per template download.
    pub sync_stagger_max_ms: u64,
    /// Minimum interval between download ticks.
    pub sync_tick_min_ms: u64,
    /// Random extra added to the tick interval.
    pub sync_tick_jitter_ms: u64,
    /// Upper bound of the percent added per tick.
    pub sync_step_max: f32,
}

/// Generative text endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingCfg {
    /// Base URL of the API (without the model path).
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Environment variable that holds the API key.
    pub api_key_env: String,
    /// Request timeout.
    pub timeout_secs: u64,
}

impl TimingCfg {
    pub fn splash(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    pub fn generation(&self) -> Duration {
        Duration::from_millis(self.generation_ms)
    }
}

impl GroundingCfg {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for Config {
    /// Defaults reproduce the timings of the original mock-up.
    fn default() -> Self {
        Self {
            ui: UiCfg {
                locale: crate::i18n::DEFAULT_LOCALE.into(),
                dark_mode: false,
                avatar_url: "https://picsum.photos/seed/user/300/300".into(),
            },
            timing: TimingCfg {
                splash_ms: 2600,
                generation_ms: 2000,
                sync_stagger_max_ms: 800,
                sync_tick_min_ms: 100,
                sync_tick_jitter_ms: 200,
                sync_step_max: 20.0,
            },
            grounding: GroundingCfg {
                endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
                model: "gemini-3-flash-preview".into(),
                api_key_env: "GEMINI_API_KEY".into(),
                timeout_secs: 30,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.timing.splash_ms, 2600);
        assert_eq!(back.grounding.model, cfg.grounding.model);
    }

    #[test]
    fn test_load_or_default_writes_file_on_first_run() {
        let dir = std::env::temp_dir().join(format!("avatar_tui_cfg_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let cfg = Config::load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.ui.locale, "zh-CN");

        // Edits on disk are picked up on the next load.
        let edited = fs::read_to_string(&path)
            .unwrap()
            .replace("dark_mode = false", "dark_mode = true");
        fs::write(&path, edited).unwrap();
        assert!(Config::load_or_default(&path).unwrap().ui.dark_mode);

        fs::remove_dir_all(&dir).unwrap();
    }
}
