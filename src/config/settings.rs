use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassKeeperError, Result};
use crate::random::{LengthRange, PasswordPreset};

/// User configuration, loaded from `.passkeeper.toml`.
///
/// Every field has a default so PassKeeper works without any config
/// file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--vault` is not given.
    #[serde(default = "default_vault")]
    pub default_vault: String,

    /// Fewest syllables in a generated name.
    #[serde(default = "default_name_syllables_min")]
    pub name_syllables_min: u32,

    /// Most syllables in a generated name.
    #[serde(default = "default_name_syllables_max")]
    pub name_syllables_max: u32,

    /// Digits in a generated PIN.
    #[serde(default = "default_pin_length")]
    pub pin_length: u32,

    /// Characters in a generated password.
    #[serde(default = "default_password_length")]
    pub password_length: u32,

    /// Bytes in a generated hex key.
    #[serde(default = "default_hex_bytes")]
    pub hex_bytes: u32,

    /// Preset used by `add --generate` when none is named.
    #[serde(default = "default_preset")]
    pub default_preset: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault() -> String {
    "passwords.passdb".to_string()
}

fn default_name_syllables_min() -> u32 {
    2
}

fn default_name_syllables_max() -> u32 {
    5
}

fn default_pin_length() -> u32 {
    4
}

fn default_password_length() -> u32 {
    12
}

fn default_hex_bytes() -> u32 {
    16
}

fn default_preset() -> String {
    PasswordPreset::default().name().to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_vault: default_vault(),
            name_syllables_min: default_name_syllables_min(),
            name_syllables_max: default_name_syllables_max(),
            pin_length: default_pin_length(),
            password_length: default_password_length(),
            hex_bytes: default_hex_bytes(),
            default_preset: default_preset(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passkeeper.toml";

    /// Load settings from `<dir>/.passkeeper.toml`.
    ///
    /// A missing file yields defaults; an unparsable or inconsistent
    /// one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassKeeperError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.name_syllables_min > self.name_syllables_max {
            return Err(PassKeeperError::ConfigError(format!(
                "name_syllables_min ({}) exceeds name_syllables_max ({})",
                self.name_syllables_min, self.name_syllables_max
            )));
        }
        self.preset()?;
        Ok(())
    }

    /// Resolve `path` or fall back to the default vault in `dir`.
    pub fn vault_path(&self, dir: &Path, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) => dir.join(p),
            None => dir.join(&self.default_vault),
        }
    }

    /// The configured default preset.
    pub fn preset(&self) -> Result<PasswordPreset> {
        self.default_preset.parse()
    }

    /// Syllable range for generated names.
    pub fn name_syllables(&self) -> LengthRange {
        LengthRange {
            min: self.name_syllables_min,
            max: self.name_syllables_max,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
