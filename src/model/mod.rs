//! Matchup prediction models.
//!
//! Every model turns a [`Matchup`] into a win probability and a spread for
//! `team1`. The bye rules are shared and evaluated before any model-specific
//! work, in this order:
//!
//! - no teams at all: [`PredictError::NoParticipants`]
//! - `team1` has a bye: `team2` wins, probability 0, spread 0
//! - `team2` has a bye: `team1` wins, probability 1, spread 0
//!
//! Models only differ in how they derive the unbiased spread. Site bias and
//! the spread → probability conversion live in [`SpreadDistribution`].

pub mod gaussian;
pub mod lookup;

pub use gaussian::{GaussianSpreadModel, RatingTable};
pub use lookup::{LookupModel, SpreadTable, TeamPair};

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::trace;

use crate::error::{ConfigError, PredictError};
use crate::matchup::{Matchup, RelativeLocation, Team};

/// Outcome of a prediction, always from `team1`'s point of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Probability that `team1` wins, in [0, 1].
    pub probability: f64,
    /// Expected margin; positive favors `team1`.
    pub spread: f64,
}

impl Prediction {
    /// Result of a matchup where one side has a bye.
    pub fn walkover(team1_wins: bool) -> Self {
        Prediction {
            probability: if team1_wins { 1.0 } else { 0.0 },
            spread: 0.0,
        }
    }

    /// The same prediction from `team2`'s point of view.
    pub fn flipped(self) -> Self {
        Prediction {
            probability: 1.0 - self.probability,
            spread: -self.spread,
        }
    }

    pub fn favors_team1(&self) -> bool {
        self.probability > 0.5
    }
}

/// Points added to `team1`'s spread for playing at `location`.
///
/// `home_bias` applies at a home/away site and `close_bias` at a near/far
/// site; positive values favor the team closer to home.
pub fn site_bias(location: RelativeLocation, home_bias: f64, close_bias: f64) -> f64 {
    match location {
        RelativeLocation::Home => home_bias,
        RelativeLocation::Near => close_bias,
        RelativeLocation::Neutral => 0.0,
        RelativeLocation::Far => -close_bias,
        RelativeLocation::Away => -home_bias,
    }
}

/// Zero-mean normal spread distribution plus the site biases applied on top
/// of a model's raw spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadDistribution {
    normal: Normal,
    std_dev: f64,
    home_bias: f64,
    close_bias: f64,
}

impl SpreadDistribution {
    pub fn new(std_dev: f64, home_bias: f64, close_bias: f64) -> Result<Self, ConfigError> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(ConfigError::InvalidStdDev(std_dev));
        }
        if !home_bias.is_finite() {
            return Err(ConfigError::NonFiniteBias {
                name: "home_bias",
                value: home_bias,
            });
        }
        if !close_bias.is_finite() {
            return Err(ConfigError::NonFiniteBias {
                name: "close_bias",
                value: close_bias,
            });
        }
        let normal = Normal::new(0.0, std_dev).map_err(|_| ConfigError::InvalidStdDev(std_dev))?;
        Ok(SpreadDistribution {
            normal,
            std_dev,
            home_bias,
            close_bias,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn home_bias(&self) -> f64 {
        self.home_bias
    }

    pub fn close_bias(&self) -> f64 {
        self.close_bias
    }

    pub fn bias(&self, location: RelativeLocation) -> f64 {
        site_bias(location, self.home_bias, self.close_bias)
    }

    /// P(margin <= spread) under the zero-mean normal; the win probability of
    /// the team the spread is quoted for.
    pub fn probability(&self, spread: f64) -> f64 {
        self.normal.cdf(spread)
    }
}

/// A model that can predict matchups.
///
/// Implementors provide the biased spread for two present teams; the bye
/// rules and the probability conversion are shared.
pub trait Predictor: Send + Sync {
    /// Spread for `team1` over `team2` at `location` (relative to `team1`),
    /// site bias included.
    fn spread(
        &self,
        team1: &Team,
        team2: &Team,
        location: RelativeLocation,
    ) -> Result<f64, PredictError>;

    fn distribution(&self) -> &SpreadDistribution;

    /// Human-readable model name for logging.
    fn name(&self) -> &str;

    fn predict(&self, matchup: &Matchup) -> Result<Prediction, PredictError> {
        let (team1, team2) = match (matchup.team1(), matchup.team2()) {
            (None, None) => return Err(PredictError::NoParticipants),
            (None, Some(_)) => return Ok(Prediction::walkover(false)),
            (Some(_), None) => return Ok(Prediction::walkover(true)),
            (Some(t1), Some(t2)) => (t1, t2),
        };
        let spread = self.spread(team1, team2, matchup.location())?;
        let probability = self.distribution().probability(spread);
        trace!(
            model = self.name(),
            %matchup,
            spread,
            probability,
            "predicted matchup"
        );
        Ok(Prediction {
            probability,
            spread,
        })
    }
}

/// Predict a slate in order. Failures are returned per matchup so callers can
/// decide which ones to skip.
pub fn predict_all(
    predictor: &dyn Predictor,
    matchups: &[Matchup],
) -> Vec<Result<Prediction, PredictError>> {
    matchups.iter().map(|m| predictor.predict(m)).collect()
}
