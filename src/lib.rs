//! Win probability and spread models for two-team matchups.
//!
//! A [`Matchup`] pairs two (possibly absent) teams at a site relative to the
//! first team. Any [`Predictor`] turns it into a [`Prediction`]: the first
//! team's win probability and the expected margin.

pub mod config;
pub mod error;
pub mod matchup;
pub mod model;
pub mod slate;

pub use config::{Config, ModelConfig};
pub use error::{ConfigError, PredictError};
pub use matchup::{Matchup, RelativeLocation, Team};
pub use model::{
    predict_all, GaussianSpreadModel, LookupModel, Prediction, Predictor, RatingTable,
    SpreadDistribution, SpreadTable, TeamPair,
};
pub use slate::{predict_slate, MissingDataPolicy, Pick, SlateReport};
