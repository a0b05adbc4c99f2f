use crate::error::Result;
use crate::weighting::Weighting;
use serde::{Deserialize, Serialize};

/// Parameters shared by every comparison.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RddConfig {
    /// Largest shortest-path radius explored around each root.
    pub radius: usize,
    pub weighting: Weighting,
}

impl Default for RddConfig {
    fn default() -> Self {
        RddConfig {
            radius: 4,
            weighting: Weighting::default(),
        }
    }
}

impl RddConfig {
    pub fn new(radius: usize) -> RddConfig {
        RddConfig {
            radius,
            ..RddConfig::default()
        }
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> RddConfig {
        self.weighting = weighting;
        self
    }

    /// Parses a configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) if the text is not valid TOML or a key
    /// has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<RddConfig> {
        Ok(toml::from_str(content)?)
    }
}
