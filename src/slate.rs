//! Turn a slate of matchups into picks.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::PredictError;
use crate::matchup::{Matchup, RelativeLocation};
use crate::model::{predict_all, Prediction, Predictor};

/// What to do with a matchup whose team or pair is missing from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDataPolicy {
    Skip,
    Fail,
}

/// One predicted matchup, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub location: RelativeLocation,
    pub probability: f64,
    pub spread: f64,
    /// Favored team; `None` for a dead-even matchup.
    pub pick: Option<String>,
}

impl Pick {
    fn new(matchup: &Matchup, prediction: Prediction) -> Self {
        let team1 = matchup.team1().map(|t| t.name().to_string());
        let team2 = matchup.team2().map(|t| t.name().to_string());
        let pick = if prediction.probability > 0.5 {
            team1.clone()
        } else if prediction.probability < 0.5 {
            team2.clone()
        } else {
            None
        };
        Pick {
            team1,
            team2,
            location: matchup.location(),
            probability: prediction.probability,
            spread: prediction.spread,
            pick,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlateReport {
    pub picks: Vec<Pick>,
    pub skipped: Vec<(Matchup, PredictError)>,
}

/// Predict every matchup in order.
///
/// A matchup with no participants always fails the slate; missing ratings or
/// lines are handled according to `policy`.
pub fn predict_slate(
    predictor: &dyn Predictor,
    matchups: &[Matchup],
    policy: MissingDataPolicy,
) -> Result<SlateReport, PredictError> {
    let mut report = SlateReport::default();
    for (matchup, result) in matchups.iter().zip(predict_all(predictor, matchups)) {
        match result {
            Ok(prediction) => report.picks.push(Pick::new(matchup, prediction)),
            Err(e) if e.is_lookup() && policy == MissingDataPolicy::Skip => {
                warn!("Skipping {}: {}", matchup, e);
                report.skipped.push((matchup.clone(), e));
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        "Predicted {} matchup(s) with {} model, skipped {}",
        report.picks.len(),
        predictor.name(),
        report.skipped.len()
    );
    Ok(report)
}
