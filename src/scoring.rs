//! Points awarded for a score prediction.

use serde::Serialize;

use crate::scoregrid::Score;

/// A three-tier scoring system. The default awards 4 points for the exact result, 3 for the
/// correct goal difference of a decisive result, and 2 for the correct tendency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringSystem {
    pub result: f64,
    pub difference: f64,
    pub tendency: f64,
}
impl ScoringSystem {
    /// Points for `predicted` if the match ends `actual`.
    ///
    /// A correctly predicted draw with the wrong score earns tendency points, not difference
    /// points. A predicted draw earns nothing for a decisive result, and vice versa.
    #[inline]
    pub fn points(&self, predicted: &Score, actual: &Score) -> f64 {
        let predicted_diff = predicted.difference();
        let actual_diff = actual.difference();
        if predicted == actual {
            self.result
        } else if predicted_diff == actual_diff {
            if predicted_diff == 0 {
                self.tendency
            } else {
                self.difference
            }
        } else if predicted_diff.signum() * actual_diff.signum() > 0 {
            self.tendency
        } else {
            0.0
        }
    }
}

impl Default for ScoringSystem {
    fn default() -> Self {
        Self {
            result: 4.0,
            difference: 3.0,
            tendency: 2.0,
        }
    }
}
