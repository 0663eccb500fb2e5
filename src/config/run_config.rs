use crate::engine::SimulatorConfig;
use crate::error::ValidationError;
use crate::indicator::IndicatorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    //data
    pub data_path: PathBuf,

    //indicator settings
    #[serde(default)]
    pub indicator: IndicatorConfig,

    //account and strategy settings
    #[serde(default)]
    pub simulator: SimulatorConfig,

    //optional output paths
    #[serde(default)]
    pub output_trades_csv: Option<PathBuf>,
    #[serde(default)]
    pub output_net_worth_csv: Option<PathBuf>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        RunConfiguration {
            data_path: PathBuf::from("SPY.csv"),
            indicator: IndicatorConfig::default(),
            simulator: SimulatorConfig::default(),
            output_trades_csv: None,
            output_net_worth_csv: None,
        }
    }
}

impl RunConfiguration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.indicator.validate()?;
        self.simulator.validate()
    }

    //load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {:?}", path))?;
        let config: RunConfiguration = serde_json::from_str(&contents)
            .context(format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).context(format!("Failed to write config file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TraversalOrder;

    #[test]
    fn json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let mut config = RunConfiguration::default();
        config.simulator.initial_cash = 2_500.0;
        config.simulator.traversal = TraversalOrder::FirstToLast;
        config.output_trades_csv = Some(PathBuf::from("trades.csv"));
        config.to_json_file(&path).unwrap();

        assert_eq!(RunConfiguration::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: RunConfiguration =
            serde_json::from_str(r#"{ "data_path": "prices.csv" }"#).unwrap();
        assert_eq!(config.indicator.window, 14);
        assert_eq!(config.simulator.oversold, 20.0);
        assert_eq!(config.simulator.overbought, 85.0);
        assert_eq!(config.simulator.traversal, TraversalOrder::LastToFirst);
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "data_path": "p.csv", "indicator": { "window": 0, "epsilon": 1e-10 } }"#,
        )
        .unwrap();

        let err = RunConfiguration::from_json_file(&path).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }
}
