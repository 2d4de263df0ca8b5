//! Roller settings and the optional TOML config file.
//!
//! ```toml
//! [settings]
//! history_window = 10
//! strats = "compact"
//!
//! [settings.odds]
//! pro_flex_duelist = 0.4
//!
//! [[agents]]
//! name = "Omen"
//! roles = ["Controller"]
//! tags = ["smokes"]
//! ```
//!
//! `agents` and `maps` each replace the built-in list when present.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Agent, Catalog, MapProfile};
use crate::error::ConfigError;

/// Probabilities of the flex slot's random overrides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlexOdds {
    /// Flex turns Sentinel on maps that want a trap anchor
    pub flex_sentinel: f64,
    /// Pro mode with flash and recon covered: Controller vs Initiator
    pub pro_split_controller: f64,
    /// Pro mode: flex goes second duelist
    pub pro_flex_duelist: f64,
    /// Ranked mode: flex goes second controller
    pub ranked_flex_controller: f64,
}

impl Default for FlexOdds {
    fn default() -> Self {
        Self {
            flex_sentinel: 0.12,
            pro_split_controller: 0.5,
            pro_flex_duelist: 0.25,
            ranked_flex_controller: 0.15,
        }
    }
}

/// How many quick strats a composition keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StratDetail {
    #[default]
    Full,
    Compact,
}

impl StratDetail {
    pub const fn cap(&self) -> usize {
        match self {
            StratDetail::Full => 8,
            StratDetail::Compact => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Compositions kept by [`crate::history::History`]
    pub history_window: usize,
    pub strats: StratDetail,
    pub odds: FlexOdds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_window: 10,
            strats: StratDetail::Full,
            odds: FlexOdds::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_window == 0 {
            return Err(ConfigError::invalid("history_window must be at least 1"));
        }
        let odds = [
            ("flex_sentinel", self.odds.flex_sentinel),
            ("pro_split_controller", self.odds.pro_split_controller),
            ("pro_flex_duelist", self.odds.pro_flex_duelist),
            ("ranked_flex_controller", self.odds.ranked_flex_controller),
        ];
        for (name, p) in odds {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid(format!(
                    "odds.{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Contents of a config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollerConfig {
    pub settings: Settings,
    pub agents: Vec<Agent>,
    pub maps: Vec<MapProfile>,
}

impl RollerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&raw)
    }

    /// Validate and split into the catalog and settings a roller needs.
    pub fn into_parts(self) -> Result<(Catalog, Settings), ConfigError> {
        self.settings.validate()?;

        let builtin = Catalog::builtin();
        let agents = if self.agents.is_empty() {
            builtin.agents().to_vec()
        } else {
            self.agents
        };
        let maps = if self.maps.is_empty() {
            builtin.maps().to_vec()
        } else {
            self.maps
        };

        let catalog = Catalog::new(agents, maps)?;
        if catalog.dive_names().is_empty() {
            log::warn!("Config has no dive duelists; every roll will fail on the dive slot");
        }
        Ok((catalog, self.settings))
    }
}
