use thiserror::Error;

/// Failure to produce a prediction for a matchup.
///
/// Every variant is recoverable: callers decide whether to skip the matchup
/// or abort the slate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Both sides of the matchup are byes.
    #[error("cannot predict a matchup with no participants")]
    NoParticipants,

    #[error("no rating for team {team}")]
    MissingRating { team: String },

    #[error("spread between {team1} and {team2} not found")]
    MissingSpread { team1: String, team2: String },
}

impl PredictError {
    /// A team or team pair was absent from the model's data.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            PredictError::MissingRating { .. } | PredictError::MissingSpread { .. }
        )
    }

    /// The matchup itself cannot be predicted by any model.
    pub fn is_domain(&self) -> bool {
        matches!(self, PredictError::NoParticipants)
    }
}

/// Fatal problems found while building a model. A model is never returned
/// partially built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "mismatched length of home ({home}), road ({road}), and spread ({spreads}) sequences"
    )]
    MismatchedLengths {
        home: usize,
        road: usize,
        spreads: usize,
    },

    #[error("standard deviation must be finite and positive, got {0}")]
    InvalidStdDev(f64),

    #[error("{name} must be finite, got {value}")]
    NonFiniteBias { name: &'static str, value: f64 },

    #[error("rating for team {team} must be finite, got {value}")]
    NonFiniteRating { team: String, value: f64 },

    #[error("failed to read model configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model configuration: {0}")]
    Json(#[from] serde_json::Error),
}
