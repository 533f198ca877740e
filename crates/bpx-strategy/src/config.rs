//! Strategy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How each market is quoted on every pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuotingMode {
    /// One bid and one ask per market per pass, same quantity.
    #[default]
    DualSide,
    /// A single side per pass, alternating on a timer and on insufficient funds.
    SideSwitch,
}

/// Strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub mode: QuotingMode,

    /// Seconds between timer-driven side flips (side_switch mode only).
    #[serde(default = "default_side_switch_interval_secs")]
    pub side_switch_interval_secs: u64,
}

fn default_side_switch_interval_secs() -> u64 {
    60
}

impl StrategyConfig {
    pub fn side_switch_interval(&self) -> Duration {
        Duration::from_secs(self.side_switch_interval_secs)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            mode: QuotingMode::default(),
            side_switch_interval_secs: default_side_switch_interval_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::default();
        assert_eq!(config.mode, QuotingMode::DualSide);
        assert_eq!(config.side_switch_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_parse_side_switch_from_toml() {
        let config: StrategyConfig = toml::from_str(
            r#"
            mode = "side_switch"
            side_switch_interval_secs = 300
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, QuotingMode::SideSwitch);
        assert_eq!(config.side_switch_interval_secs, 300);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StrategyConfig = toml::from_str("").unwrap();
        assert_eq!(config.mode, QuotingMode::DualSide);
        assert_eq!(config.side_switch_interval_secs, 60);
    }
}
