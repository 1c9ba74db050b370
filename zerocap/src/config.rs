use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use zerocap_key::JwsAlgorithm;

use crate::{CapError, CapResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The default maximum number of capabilities in a delegation chain.
pub const DEFAULT_MAX_DEPTH: usize = 20;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Configuration of a [`CapabilityVerifier`][crate::CapabilityVerifier].
///
/// ```toml
/// max_depth = 20
/// algorithms = ["EdDSA", "ES256"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct VerifierConfig {
    /// The maximum number of capabilities accepted in a delegation chain.
    #[serde(default = "default_max_depth")]
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// The signing algorithms accepted in token headers.
    #[serde(default = "default_algorithms")]
    #[builder(default = default_algorithms())]
    pub algorithms: Vec<JwsAlgorithm>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl VerifierConfig {
    /// Loads the configuration from a toml file.
    pub fn from_file(path: impl AsRef<Path>) -> CapResult<Self> {
        let config = fs::read_to_string(path)?;
        Self::from_string(config)
    }

    /// Loads the configuration from a toml string.
    pub fn from_string(config: impl AsRef<str>) -> CapResult<Self> {
        let config: Self = toml::from_str(config.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CapResult<()> {
        if self.max_depth == 0 {
            return Err(CapError::InvalidConfig(
                "max_depth must be at least 1".into(),
            ));
        }

        if self.algorithms.is_empty() {
            return Err(CapError::InvalidConfig(
                "at least one algorithm must be accepted".into(),
            ));
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_algorithms() -> Vec<JwsAlgorithm> {
    vec![JwsAlgorithm::EdDSA, JwsAlgorithm::ES256]
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
