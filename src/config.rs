use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Share one leaf between equal integer literals instead of
    /// materializing a fresh leaf for every use.
    pub intern_literals: bool,
}

impl BuilderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Absorbed into every transcript; prover and verifier must agree on it.
    pub domain: String,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            domain: "r1cs-gadgets".to_string(),
        }
    }
}

impl ProverConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_config_default() {
        let config = BuilderConfig::from_json_str("{}").unwrap();
        assert!(!config.intern_literals);
        assert_eq!(config, BuilderConfig::default());
    }

    #[test]
    fn test_builder_config_json() {
        let config = BuilderConfig::from_json_str(r#"{"intern_literals": true}"#).unwrap();
        assert!(config.intern_literals);
    }

    #[test]
    fn test_prover_config_json() {
        assert_eq!(
            ProverConfig::from_json_str("{}").unwrap().domain,
            "r1cs-gadgets"
        );
        assert_eq!(
            ProverConfig::from_json_str(r#"{"domain": "auction"}"#).unwrap(),
            ProverConfig::new("auction")
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ProverConfig::from_json_str(r#"{"domain": 3}"#),
            Err(crate::Error::Config(_))
        ));
    }
}
