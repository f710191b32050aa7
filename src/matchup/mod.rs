pub mod location;
pub mod team;

pub use location::RelativeLocation;
pub use team::Team;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PredictError;
use crate::model::{Prediction, Predictor};

/// A pairing of two teams at a site.
///
/// Either team may be absent, which means that side has a bye. `location` is
/// always relative to `team1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    #[serde(default)]
    team1: Option<Team>,
    #[serde(default)]
    team2: Option<Team>,
    #[serde(default)]
    location: RelativeLocation,
}

impl Matchup {
    pub fn new(team1: Option<Team>, team2: Option<Team>, location: RelativeLocation) -> Self {
        Matchup {
            team1,
            team2,
            location,
        }
    }

    /// Both teams present.
    pub fn between(team1: Team, team2: Team, location: RelativeLocation) -> Self {
        Matchup::new(Some(team1), Some(team2), location)
    }

    /// A scheduled game record: `home` plays at home unless the game is at a
    /// neutral site.
    pub fn from_game(home: Team, away: Team, neutral_site: bool) -> Self {
        let location = if neutral_site {
            RelativeLocation::Neutral
        } else {
            RelativeLocation::Home
        };
        Matchup::between(home, away, location)
    }

    pub fn team1(&self) -> Option<&Team> {
        self.team1.as_ref()
    }

    pub fn team2(&self) -> Option<&Team> {
        self.team2.as_ref()
    }

    /// Site relative to `team1`.
    pub fn location(&self) -> RelativeLocation {
        self.location
    }

    /// Site relative to `team1` when `is_team1`, otherwise relative to `team2`.
    pub fn location_relative_to(&self, is_team1: bool) -> RelativeLocation {
        if is_team1 {
            self.location
        } else {
            self.location.negate()
        }
    }

    /// The same game described from `team2`'s side.
    pub fn swapped(&self) -> Self {
        Matchup {
            team1: self.team2.clone(),
            team2: self.team1.clone(),
            location: self.location.negate(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team1.is_none() || self.team2.is_none()
    }

    pub fn predict(&self, predictor: &dyn Predictor) -> Result<Prediction, PredictError> {
        predictor.predict(self)
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |t: &Option<Team>| {
            t.as_ref()
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| "BYE".to_string())
        };
        write!(
            f,
            "{} vs {} ({})",
            name(&self.team1),
            name(&self.team2),
            self.location
        )
    }
}
