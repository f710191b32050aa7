use std::collections::HashMap;
use tracing::{debug, warn};

use super::{Predictor, SpreadDistribution};
use crate::error::{ConfigError, PredictError};
use crate::matchup::{RelativeLocation, Team};

/// Unordered pair of teams, stored in canonical (name) order so that
/// `TeamPair::new(a, b) == TeamPair::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamPair {
    first: Team,
    second: Team,
}

impl TeamPair {
    pub fn new(a: &Team, b: &Team) -> Self {
        TeamPair::canonical(a, b).0
    }

    /// Canonical pair for `(a, b)`, and whether `(a, b)` had to be reversed
    /// to reach it.
    pub fn canonical(a: &Team, b: &Team) -> (Self, bool) {
        if a <= b {
            (
                TeamPair {
                    first: a.clone(),
                    second: b.clone(),
                },
                false,
            )
        } else {
            (
                TeamPair {
                    first: b.clone(),
                    second: a.clone(),
                },
                true,
            )
        }
    }

    pub fn teams(&self) -> (&Team, &Team) {
        (&self.first, &self.second)
    }

    pub fn contains(&self, team: &Team) -> bool {
        &self.first == team || &self.second == team
    }
}

/// Lines stored for one unordered pair, one slot per orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SpreadEntry {
    /// Canonical first team at home over the second.
    forward: Option<f64>,
    /// Canonical second team at home over the first.
    backward: Option<f64>,
}

impl SpreadEntry {
    fn slot(&mut self, reversed: bool) -> &mut Option<f64> {
        if reversed {
            &mut self.backward
        } else {
            &mut self.forward
        }
    }

    fn line(&self, reversed: bool) -> Option<f64> {
        if reversed {
            self.backward
        } else {
            self.forward
        }
    }

    fn lines(&self) -> usize {
        self.forward.is_some() as usize + self.backward.is_some() as usize
    }
}

/// Observed spreads keyed by unordered team pair.
///
/// Both orientations of a pair share one bucket, so a home-and-home series
/// keeps both lines. A lookup prefers the line in the query's own
/// orientation and falls back to the opposite one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadTable {
    entries: HashMap<TeamPair, SpreadEntry>,
}

impl SpreadTable {
    pub fn new() -> Self {
        SpreadTable::default()
    }

    /// Build from parallel home/road/spread sequences.
    ///
    /// Fails without building anything when the lengths differ. Non-finite
    /// spreads mark games with no line and are left out of the table.
    pub fn from_sequences(
        home_teams: &[Team],
        road_teams: &[Team],
        spreads: &[f64],
    ) -> Result<Self, ConfigError> {
        if home_teams.len() != road_teams.len() || home_teams.len() != spreads.len() {
            return Err(ConfigError::MismatchedLengths {
                home: home_teams.len(),
                road: road_teams.len(),
                spreads: spreads.len(),
            });
        }

        let mut table = SpreadTable::new();
        for ((home, road), &spread) in home_teams.iter().zip(road_teams).zip(spreads) {
            if !spread.is_finite() {
                warn!("No line for {} vs {}, skipping", home, road);
                continue;
            }
            if let Some(previous) = table.insert(home.clone(), road.clone(), spread) {
                warn!(
                    "Duplicate line for {} at home to {}: {} replaced by {}",
                    home, road, previous, spread
                );
            }
        }
        Ok(table)
    }

    /// Store `spread` for `home` over `road`. Returns the line previously
    /// stored for the same home and road teams; the opposite orientation is
    /// kept separately.
    pub fn insert(&mut self, home: Team, road: Team, spread: f64) -> Option<f64> {
        let (pair, reversed) = TeamPair::canonical(&home, &road);
        self.entries
            .entry(pair)
            .or_default()
            .slot(reversed)
            .replace(spread)
    }

    /// Spread for `team1` over `team2`, and whether it came from the line
    /// stored the other way round.
    pub fn get(&self, team1: &Team, team2: &Team) -> Option<(f64, bool)> {
        let (pair, reversed) = TeamPair::canonical(team1, team2);
        let entry = self.entries.get(&pair)?;
        if let Some(spread) = entry.line(reversed) {
            return Some((spread, false));
        }
        entry.line(!reversed).map(|spread| (-spread, true))
    }

    pub fn contains(&self, pair: &TeamPair) -> bool {
        self.entries.contains_key(pair)
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.entries.values().map(SpreadEntry::lines).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spreads from a table of lines, converted to win probabilities with the same
/// normal distribution and site biases as [`super::GaussianSpreadModel`].
///
/// When a matchup is found in the opposite orientation to the stored line,
/// the stored spread is negated and the site bias is subtracted rather than
/// added: the location is read against the stored line's home team.
#[derive(Debug, Clone)]
pub struct LookupModel {
    spreads: SpreadTable,
    distribution: SpreadDistribution,
}

impl LookupModel {
    pub fn new(
        home_teams: &[Team],
        road_teams: &[Team],
        spreads: &[f64],
        std_dev: f64,
        home_bias: f64,
        close_bias: f64,
    ) -> Result<Self, ConfigError> {
        let table = SpreadTable::from_sequences(home_teams, road_teams, spreads)?;
        LookupModel::from_table(table, std_dev, home_bias, close_bias)
    }

    pub fn from_table(
        spreads: SpreadTable,
        std_dev: f64,
        home_bias: f64,
        close_bias: f64,
    ) -> Result<Self, ConfigError> {
        let distribution = SpreadDistribution::new(std_dev, home_bias, close_bias)?;
        debug!(
            lines = spreads.len(),
            std_dev, home_bias, close_bias, "built lookup model"
        );
        Ok(LookupModel {
            spreads,
            distribution,
        })
    }

    pub fn table(&self) -> &SpreadTable {
        &self.spreads
    }
}

impl Predictor for LookupModel {
    fn spread(
        &self,
        team1: &Team,
        team2: &Team,
        location: RelativeLocation,
    ) -> Result<f64, PredictError> {
        let (spread, swap) =
            self.spreads
                .get(team1, team2)
                .ok_or_else(|| PredictError::MissingSpread {
                    team1: team1.name().to_string(),
                    team2: team2.name().to_string(),
                })?;
        let bias = self.distribution.bias(location);
        Ok(if swap { spread - bias } else { spread + bias })
    }

    fn distribution(&self) -> &SpreadDistribution {
        &self.distribution
    }

    fn name(&self) -> &str {
        "lookup"
    }
}
