use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use fairdice_types::DiceSet;
use serde::Deserialize;
use tracing::Level;

/// Default tracing level when neither the flag nor the file sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Optional YAML configuration file.
///
/// ```yaml
/// dice:
///   - 2,2,4,4,9,9
///   - 6,8,1,1,8,6
///   - 7,5,3,7,5,3
/// log_level: info
/// color: false
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub dice: Vec<String>,
    pub log_level: Option<String>,
    pub color: Option<bool>,
}

impl FileConfig {
    pub fn from_yaml(data: &str) -> Result<Self> {
        serde_yaml::from_str(data).context("could not parse config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_yaml(&data)
    }
}

/// Command line values that take part in the merge.
#[derive(Debug, Default)]
pub struct Overrides {
    pub dice: Vec<String>,
    pub log_level: Option<String>,
    pub no_color: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub dice: DiceSet,
    pub level: Level,
    pub color: bool,
}

impl Settings {
    /// Merge command line values over the file. Positional dice replace the
    /// file's list entirely.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        if let Some(flag) = overrides.dice.iter().find(|die| die.starts_with("--")) {
            bail!("Unexpected option {flag} after the dice. Options must come before the dice.");
        }
        let dice = if overrides.dice.is_empty() {
            file.dice
        } else {
            overrides.dice
        };
        let dice = DiceSet::parse(&dice)?;

        let level = overrides
            .log_level
            .or(file.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let level =
            Level::from_str(&level).map_err(|_| anyhow!("Invalid log level: {level}"))?;

        let color = !overrides.no_color && file.color.unwrap_or(true);
        Ok(Self { dice, level, color })
    }
}
