use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Where a matchup is played, relative to one of the two teams.
///
/// Variants are ordered by how favorable the site is to that team. The
/// location as seen by the opponent is always the negation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum RelativeLocation {
    /// The opponent's home field.
    Away = -2,
    /// Closer to the opponent's home field than to the team's own.
    Far = -1,
    /// A truly neutral site.
    #[default]
    Neutral = 0,
    /// Closer to the team's home field than to the opponent's.
    Near = 1,
    /// The team's home field.
    Home = 2,
}

impl RelativeLocation {
    pub const ALL: [RelativeLocation; 5] = [
        RelativeLocation::Home,
        RelativeLocation::Near,
        RelativeLocation::Neutral,
        RelativeLocation::Far,
        RelativeLocation::Away,
    ];

    pub fn value(self) -> i8 {
        self as i8
    }

    /// The same site seen from the other team.
    pub fn negate(self) -> Self {
        match self {
            RelativeLocation::Home => RelativeLocation::Away,
            RelativeLocation::Near => RelativeLocation::Far,
            RelativeLocation::Neutral => RelativeLocation::Neutral,
            RelativeLocation::Far => RelativeLocation::Near,
            RelativeLocation::Away => RelativeLocation::Home,
        }
    }

    /// Parse the site marker that prefixes an opponent on a team schedule
    /// (`@Utah`, `>Utah`, `<Utah`, `!Utah`, `Utah`). The result is relative to
    /// the schedule's team, not the opponent.
    pub fn from_schedule_marker(entry: &str) -> Self {
        match entry.chars().next() {
            Some('@') => RelativeLocation::Away,
            Some('>') => RelativeLocation::Far,
            Some('<') => RelativeLocation::Near,
            Some('!') => RelativeLocation::Neutral,
            _ => RelativeLocation::Home,
        }
    }
}

impl Neg for RelativeLocation {
    type Output = RelativeLocation;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl TryFrom<i8> for RelativeLocation {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(RelativeLocation::Home),
            1 => Ok(RelativeLocation::Near),
            0 => Ok(RelativeLocation::Neutral),
            -1 => Ok(RelativeLocation::Far),
            -2 => Ok(RelativeLocation::Away),
            other => Err(format!("relative location out of range: {}", other)),
        }
    }
}

impl fmt::Display for RelativeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelativeLocation::Home => "Home",
            RelativeLocation::Near => "Near",
            RelativeLocation::Neutral => "Neutral",
            RelativeLocation::Far => "Far",
            RelativeLocation::Away => "Away",
        };
        f.write_str(s)
    }
}

impl FromStr for RelativeLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(RelativeLocation::Home),
            "near" => Ok(RelativeLocation::Near),
            "neutral" => Ok(RelativeLocation::Neutral),
            "far" => Ok(RelativeLocation::Far),
            "away" => Ok(RelativeLocation::Away),
            other => Err(format!(
                "unknown location '{}' (expected home, near, neutral, far or away)",
                other
            )),
        }
    }
}
