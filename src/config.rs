use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::matchup::{Matchup, RelativeLocation, Team};
use crate::model::{GaussianSpreadModel, LookupModel, Predictor};

/// Persisted model parameters, tagged by `kind`.
///
/// ```json
/// {"kind": "gaussian", "std_dev": 12.0, "home_bias": 2.0, "close_bias": 1.0,
///  "ratings": {"A": 0.0, "B": 1.0}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelConfig {
    Gaussian {
        std_dev: f64,
        #[serde(default)]
        home_bias: f64,
        #[serde(default)]
        close_bias: f64,
        ratings: HashMap<String, f64>,
    },
    Lookup {
        std_dev: f64,
        #[serde(default)]
        home_bias: f64,
        #[serde(default)]
        close_bias: f64,
        home_teams: Vec<String>,
        road_teams: Vec<String>,
        /// `null` marks a game with no line.
        spreads: Vec<Option<f64>>,
    },
}

impl ModelConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        ModelConfig::from_json_str(&raw)
    }

    pub fn build(&self) -> Result<Box<dyn Predictor>, ConfigError> {
        match self {
            ModelConfig::Gaussian {
                std_dev,
                home_bias,
                close_bias,
                ratings,
            } => {
                let ratings = ratings
                    .iter()
                    .map(|(name, rating)| (Team::new(name.as_str()), *rating))
                    .collect();
                let model = GaussianSpreadModel::new(ratings, *std_dev, *home_bias, *close_bias)?;
                Ok(Box::new(model))
            }
            ModelConfig::Lookup {
                std_dev,
                home_bias,
                close_bias,
                home_teams,
                road_teams,
                spreads,
            } => {
                let home: Vec<Team> = home_teams.iter().map(|n| Team::new(n.as_str())).collect();
                let road: Vec<Team> = road_teams.iter().map(|n| Team::new(n.as_str())).collect();
                let spreads: Vec<f64> = spreads.iter().map(|s| s.unwrap_or(f64::NAN)).collect();
                let model =
                    LookupModel::new(&home, &road, &spreads, *std_dev, *home_bias, *close_bias)?;
                Ok(Box::new(model))
            }
        }
    }
}

/// Predict matchups from a stored model
#[derive(Parser, Debug, Clone)]
#[command(name = "pickem", version, about)]
pub struct Config {
    /// Model configuration file (JSON)
    #[arg(long, env = "PICKEM_MODEL_CONFIG")]
    pub model_config: PathBuf,

    /// Matchups file: JSON array of {"team1", "team2", "location"}
    #[arg(long, env = "PICKEM_MATCHUPS")]
    pub matchups: Option<PathBuf>,

    /// First team of a single matchup (omit for a bye)
    #[arg(long)]
    pub team1: Option<String>,

    /// Second team of a single matchup (omit for a bye)
    #[arg(long)]
    pub team2: Option<String>,

    /// Site relative to team1: home, near, neutral, far or away
    #[arg(long, default_value = "neutral")]
    pub location: RelativeLocation,

    /// Abort on a matchup with no rating or line instead of skipping it
    #[arg(long, env = "PICKEM_FAIL_ON_MISSING", default_value = "false")]
    pub fail_on_missing: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let single = self.team1.is_some() || self.team2.is_some();
        if self.matchups.is_some() && single {
            anyhow::bail!("--matchups cannot be combined with --team1/--team2");
        }
        if self.matchups.is_none() && !single {
            anyhow::bail!("either --matchups or at least one of --team1/--team2 is required");
        }
        Ok(())
    }

    /// The matchup given with --team1/--team2, if any.
    pub fn single_matchup(&self) -> Option<Matchup> {
        if self.team1.is_none() && self.team2.is_none() {
            return None;
        }
        Some(Matchup::new(
            self.team1.as_deref().map(Team::new),
            self.team2.as_deref().map(Team::new),
            self.location,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builds_gaussian_model() {
        let cfg = ModelConfig::from_json_str(
            r#"{"kind":"gaussian","std_dev":12.0,"home_bias":2.0,"close_bias":1.0,
                "ratings":{"A":0.0,"B":1.0}}"#,
        )
        .unwrap();
        let model = cfg.build().unwrap();
        assert_eq!(model.name(), "gaussian");
        let p = model
            .predict(&Matchup::between(
                Team::new("A"),
                Team::new("B"),
                RelativeLocation::Home,
            ))
            .unwrap();
        assert_relative_eq!(p.spread, 1.0);
    }

    #[test]
    fn biases_default_to_zero() {
        let cfg = ModelConfig::from_json_str(
            r#"{"kind":"gaussian","std_dev":10.0,"ratings":{"A":3.0,"B":1.0}}"#,
        )
        .unwrap();
        let model = cfg.build().unwrap();
        assert_eq!(model.distribution().home_bias(), 0.0);
        let p = model
            .predict(&Matchup::between(
                Team::new("A"),
                Team::new("B"),
                RelativeLocation::Home,
            ))
            .unwrap();
        assert_relative_eq!(p.spread, 2.0);
    }

    #[test]
    fn builds_lookup_model_with_missing_lines() {
        let cfg = ModelConfig::from_json_str(
            r#"{"kind":"lookup","std_dev":12.0,"home_bias":2.0,"close_bias":1.0,
                "home_teams":["A","A","B"],"road_teams":["B","C","C"],
                "spreads":[-1.0,null,0.0]}"#,
        )
        .unwrap();
        let model = cfg.build().unwrap();
        assert_eq!(model.name(), "lookup");
        let m = Matchup::between(Team::new("A"), Team::new("C"), RelativeLocation::Neutral);
        assert!(model.predict(&m).unwrap_err().is_lookup());
    }

    #[test]
    fn mismatched_lookup_config_is_fatal() {
        let cfg = ModelConfig::from_json_str(
            r#"{"kind":"lookup","std_dev":12.0,
                "home_teams":["A"],"road_teams":["A","B"],"spreads":[1.0]}"#,
        )
        .unwrap();
        assert!(matches!(
            cfg.build(),
            Err(ConfigError::MismatchedLengths { .. })
        ));
    }

    #[test]
    fn non_finite_rating_is_fatal() {
        let cfg = ModelConfig::from_json_str(
            r#"{"kind":"gaussian","std_dev":12.0,"ratings":{"A":1e400,"B":1.0}}"#,
        );
        // serde_json refuses out-of-range numbers before the model sees them.
        assert!(cfg.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = ModelConfig::from_json_str(r#"{"kind":"elo","std_dev":1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ModelConfig::load("/nonexistent/pickem/model.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn cli_single_matchup() {
        let cfg = Config::try_parse_from([
            "pickem",
            "--model-config",
            "model.json",
            "--team1",
            "A",
            "--location",
            "away",
        ])
        .unwrap();
        cfg.validate().unwrap();
        let m = cfg.single_matchup().unwrap();
        assert_eq!(m.team1(), Some(&Team::new("A")));
        assert_eq!(m.team2(), None);
        assert_eq!(m.location(), RelativeLocation::Away);
        assert!(!cfg.fail_on_missing);
    }

    #[test]
    fn cli_requires_exactly_one_source() {
        let cfg = Config::try_parse_from(["pickem", "--model-config", "model.json"]).unwrap();
        assert!(cfg.validate().is_err());

        let cfg = Config::try_parse_from([
            "pickem",
            "--model-config",
            "model.json",
            "--matchups",
            "week1.json",
            "--team1",
            "A",
        ])
        .unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn cli_rejects_unknown_location() {
        assert!(Config::try_parse_from([
            "pickem",
            "--model-config",
            "model.json",
            "--team1",
            "A",
            "--location",
            "road",
        ])
        .is_err());
    }
}
