use std::collections::HashMap;
use tracing::debug;

use super::{Predictor, SpreadDistribution};
use crate::error::{ConfigError, PredictError};
use crate::matchup::{RelativeLocation, Team};

/// Per-team scalar ratings, in points.
pub type RatingTable = HashMap<Team, f64>;

/// Spread from the rating difference of the two teams plus site bias,
/// converted to a win probability with a zero-mean normal of scale `std_dev`.
///
/// A positive `home_bias` or `close_bias` is points added to the spread of the
/// team playing at (or near) home.
#[derive(Debug, Clone)]
pub struct GaussianSpreadModel {
    ratings: RatingTable,
    distribution: SpreadDistribution,
}

impl GaussianSpreadModel {
    pub fn new(
        ratings: RatingTable,
        std_dev: f64,
        home_bias: f64,
        close_bias: f64,
    ) -> Result<Self, ConfigError> {
        let distribution = SpreadDistribution::new(std_dev, home_bias, close_bias)?;
        if let Some((team, &value)) = ratings.iter().find(|(_, r)| !r.is_finite()) {
            return Err(ConfigError::NonFiniteRating {
                team: team.name().to_string(),
                value,
            });
        }
        debug!(
            teams = ratings.len(),
            std_dev, home_bias, close_bias, "built gaussian spread model"
        );
        Ok(GaussianSpreadModel {
            ratings,
            distribution,
        })
    }

    pub fn rating(&self, team: &Team) -> Option<f64> {
        self.ratings.get(team).copied()
    }

    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    fn lookup(&self, team: &Team) -> Result<f64, PredictError> {
        self.rating(team).ok_or_else(|| PredictError::MissingRating {
            team: team.name().to_string(),
        })
    }
}

impl Predictor for GaussianSpreadModel {
    fn spread(
        &self,
        team1: &Team,
        team2: &Team,
        location: RelativeLocation,
    ) -> Result<f64, PredictError> {
        let r1 = self.lookup(team1)?;
        let r2 = self.lookup(team2)?;
        Ok(r1 - r2 + self.distribution.bias(location))
    }

    fn distribution(&self) -> &SpreadDistribution {
        &self.distribution
    }

    fn name(&self) -> &str {
        "gaussian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::Matchup;
    use crate::model::Prediction;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use statrs::distribution::{ContinuousCDF, Normal};

    fn ab_model(std_dev: f64) -> GaussianSpreadModel {
        let mut ratings = RatingTable::new();
        ratings.insert(Team::new("A"), 0.0);
        ratings.insert(Team::new("B"), 1.0);
        GaussianSpreadModel::new(ratings, std_dev, 2.0, 1.0).unwrap()
    }

    fn cdf(sigma: f64, x: f64) -> f64 {
        Normal::new(0.0, sigma).unwrap().cdf(x)
    }

    fn predict(
        model: &GaussianSpreadModel,
        t1: &str,
        t2: &str,
        loc: RelativeLocation,
    ) -> Result<Prediction, PredictError> {
        model.predict(&Matchup::between(Team::new(t1), Team::new(t2), loc))
    }

    #[test]
    fn same_team_by_location() {
        let m = ab_model(12.0);
        let cases = [
            (RelativeLocation::Neutral, 0.0),
            (RelativeLocation::Near, 1.0),
            (RelativeLocation::Home, 2.0),
            (RelativeLocation::Far, -1.0),
            (RelativeLocation::Away, -2.0),
        ];
        for (loc, spread) in cases {
            let p = predict(&m, "A", "A", loc).unwrap();
            assert_relative_eq!(p.spread, spread);
            assert_relative_eq!(p.probability, cdf(12.0, spread), epsilon = 1e-12);
        }
    }

    #[test]
    fn self_matchup_is_a_coin_flip() {
        let m = ab_model(12.0);
        for team in ["A", "B"] {
            let p = predict(&m, team, team, RelativeLocation::Neutral).unwrap();
            assert_relative_eq!(p.probability, 0.5, epsilon = 1e-12);
            assert_relative_eq!(p.spread, 0.0);
        }
    }

    #[test]
    fn rating_difference_neutral() {
        let m = ab_model(12.0);
        let p = predict(&m, "A", "B", RelativeLocation::Neutral).unwrap();
        assert_relative_eq!(p.spread, -1.0);
        assert_relative_eq!(p.probability, 0.466_79, epsilon = 1e-5);

        let p = predict(&m, "B", "A", RelativeLocation::Neutral).unwrap();
        assert_relative_eq!(p.spread, 1.0);
        assert_relative_eq!(p.probability, cdf(12.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn home_bias_overcomes_rating_gap() {
        let m = ab_model(12.0);
        let p = predict(&m, "A", "B", RelativeLocation::Home).unwrap();
        assert_relative_eq!(p.spread, 1.0);
        assert_relative_eq!(p.probability, 0.533_21, epsilon = 1e-5);
    }

    #[test]
    fn standard_normal_scale() {
        let m = ab_model(1.0);
        let p = predict(&m, "A", "B", RelativeLocation::Neutral).unwrap();
        assert_relative_eq!(p.probability, 1.0 - cdf(1.0, 1.0), epsilon = 1e-12);
        let p = predict(&m, "B", "A", RelativeLocation::Neutral).unwrap();
        assert_relative_eq!(p.probability, cdf(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn missing_ratings_are_lookup_errors() {
        let m = ab_model(1.0);
        let err = predict(&m, "Q", "B", RelativeLocation::Neutral).unwrap_err();
        assert_eq!(err, PredictError::MissingRating { team: "Q".into() });
        assert!(err.is_lookup());

        let err = predict(&m, "A", "Z", RelativeLocation::Neutral).unwrap_err();
        assert_eq!(err.to_string(), "no rating for team Z");
    }

    #[test]
    fn byes_take_precedence() {
        let m = ab_model(1.0);
        for loc in RelativeLocation::ALL {
            let p = m
                .predict(&Matchup::new(None, Some(Team::new("B")), loc))
                .unwrap();
            assert_eq!(p, Prediction::walkover(false));

            let p = m
                .predict(&Matchup::new(Some(Team::new("A")), None, loc))
                .unwrap();
            assert_eq!(p, Prediction::walkover(true));

            // Unrated teams still win on a bye.
            let p = m
                .predict(&Matchup::new(Some(Team::new("Q")), None, loc))
                .unwrap();
            assert_eq!(p.probability, 1.0);

            let err = m.predict(&Matchup::new(None, None, loc)).unwrap_err();
            assert_eq!(err, PredictError::NoParticipants);
            assert!(err.is_domain());
        }
    }

    #[test]
    fn perspective_symmetry() {
        let mut rng = StdRng::seed_from_u64(7);
        let names: Vec<String> = (0..12).map(|i| format!("T{}", i)).collect();
        let ratings: RatingTable = names
            .iter()
            .map(|n| (Team::new(n.as_str()), rng.gen_range(-30.0..30.0)))
            .collect();
        let m = GaussianSpreadModel::new(ratings, 13.5, 2.5, 1.0).unwrap();

        for _ in 0..200 {
            let t1 = Team::new(names[rng.gen_range(0..names.len())].as_str());
            let t2 = Team::new(names[rng.gen_range(0..names.len())].as_str());
            let loc = RelativeLocation::ALL[rng.gen_range(0..5)];
            let forward = Matchup::between(t1, t2, loc);

            let p = m.predict(&forward).unwrap();
            let q = m.predict(&forward.swapped()).unwrap();
            assert_relative_eq!(q.spread, -p.spread, epsilon = 1e-9);
            assert_relative_eq!(q.probability, 1.0 - p.probability, epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_non_finite_ratings() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut ratings = RatingTable::new();
            ratings.insert(Team::new("A"), bad);
            ratings.insert(Team::new("B"), 1.0);
            let err = GaussianSpreadModel::new(ratings, 12.0, 2.0, 1.0).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::NonFiniteRating { ref team, .. } if team == "A"
            ));
        }
    }

    #[test]
    fn rejects_non_positive_std_dev() {
        assert!(matches!(
            GaussianSpreadModel::new(RatingTable::new(), 0.0, 2.0, 1.0),
            Err(ConfigError::InvalidStdDev(_))
        ));
    }
}
