//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use basket_miner::AprioriConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available threshold profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// Named pair of analysis thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Minimum support ratio
    pub min_support: f64,

    /// Minimum confidence ratio
    pub min_confidence: f64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Rules shown in the analyze report
    #[serde(default = "default_top_rules")]
    pub top_rules: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Comma-separated values
    Csv,
}

impl Profile {
    /// Thresholds for the analysis engine
    pub fn to_apriori_config(self) -> Result<AprioriConfig> {
        Ok(AprioriConfig::new(self.min_support, self.min_confidence)?)
    }
}

impl From<AprioriConfig> for Profile {
    fn from(config: AprioriConfig) -> Self {
        Self {
            min_support: config.min_support,
            min_confidence: config.min_confidence,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".basket").join("config.toml"))
    }

    /// Load configuration from `path` or create default.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.location = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the configuration named on the command line, or the default one.
    ///
    /// A file that exists but cannot be read or parsed is an error, so that
    /// later saves never replace it with defaults or land in another file.
    /// Without a home directory the defaults are used and nothing is saved.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::path() {
                Ok(path) => Self::load_from(&path),
                Err(e) => {
                    tracing::warn!("Using default configuration: {}", e);
                    Ok(Self::default())
                }
            },
        }
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.location {
            Some(path) => self.save_to(path),
            None => self.save_to(&Self::path()?),
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) -> Result<()> {
        profile.to_apriori_config()?;
        self.profiles.insert(name, profile);
        Ok(())
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Thresholds of the active profile with command-line overrides applied.
    pub fn thresholds(
        &self,
        min_support: Option<f64>,
        min_confidence: Option<f64>,
    ) -> Result<AprioriConfig> {
        let profile = self.get_active_profile()?;
        let config = AprioriConfig {
            min_support: min_support.unwrap_or(profile.min_support),
            min_confidence: min_confidence.unwrap_or(profile.min_confidence),
        };
        config.validate()?;
        tracing::debug!(
            "Thresholds from profile '{}': support {}, confidence {}",
            self.active_profile,
            config.min_support,
            config.min_confidence
        );
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        let profiles = BTreeMap::from([
            ("default".to_string(), AprioriConfig::default().into()),
            ("strict".to_string(), AprioriConfig::strict().into()),
            ("exploratory".to_string(), AprioriConfig::exploratory().into()),
        ]);

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            location: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            top_rules: 5,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_top_rules() -> usize {
    5
}
