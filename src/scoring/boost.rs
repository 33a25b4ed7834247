use serde::{Deserialize, Serialize};

/// Relationship between the viewer and the author. It cannot be observed from
/// a rendered post, so the booster works with an assumed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceNetwork {
    InNetwork,
    OutOfNetwork,
}

impl AudienceNetwork {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "in_network" | "in-network" | "in" => Some(AudienceNetwork::InNetwork),
            "out_of_network" | "out-of-network" | "oon" | "out" => {
                Some(AudienceNetwork::OutOfNetwork)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifiedBoostConfig {
    pub in_network: f64,
    pub out_of_network: f64,
    pub assumed_network: AudienceNetwork,
}

impl Default for VerifiedBoostConfig {
    fn default() -> Self {
        Self {
            in_network: 4.0,
            out_of_network: 2.0,
            assumed_network: AudienceNetwork::OutOfNetwork,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifiedBooster {
    config: VerifiedBoostConfig,
}

impl VerifiedBooster {
    pub fn new(config: VerifiedBoostConfig) -> Self {
        Self { config }
    }

    /// Multiplier for a post; unverified authors always get `1.0`.
    pub fn factor(&self, is_verified: bool) -> f64 {
        if !is_verified {
            return 1.0;
        }
        match self.config.assumed_network {
            AudienceNetwork::InNetwork => self.config.in_network,
            AudienceNetwork::OutOfNetwork => self.config.out_of_network,
        }
    }
}
