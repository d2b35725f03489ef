//! Choosing the score prediction with the highest expected points.

use serde::Serialize;

use crate::poisson::GoalDistribution;
use crate::scoregrid::{Correction, Score, ScoreGrid};
use crate::scoring::ScoringSystem;

/// A score prediction, its expected points and the probability of the exact score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bet {
    pub score: Score,
    pub ev: f64,
    pub odds: f64,
}

/// Expected points for `predicted`, summed over every outcome within the grid's evaluation caps.
pub fn bet_ev(predicted: &Score, grid: &ScoreGrid, scoring: &ScoringSystem) -> f64 {
    let mut ev = 0.0;
    for home_goals in 0..grid.home_cap() {
        for guest_goals in 0..grid.guest_cap() {
            let actual = Score::new(home_goals as u8, guest_goals as u8);
            ev += grid[(home_goals, guest_goals)] * scoring.points(predicted, &actual);
        }
    }
    ev
}

/// Exhaustively searches the predictions within the grid's caps. A later candidate replaces the
/// incumbent only if its expected points are strictly greater.
pub fn best_bet(grid: &ScoreGrid, scoring: &ScoringSystem) -> Bet {
    let mut best = Bet::default();
    for home_goals in 0..grid.home_cap() {
        for guest_goals in 0..grid.guest_cap() {
            let candidate = Score::new(home_goals as u8, guest_goals as u8);
            let ev = bet_ev(&candidate, grid, scoring);
            if ev > best.ev {
                best.score = candidate;
                best.ev = ev;
            }
        }
    }
    best.odds = grid.prob(&best.score);
    best
}

/// [`best_bet`] over the low-score-corrected grid of two goal distributions.
pub fn best_corrected_bet(
    home: &GoalDistribution,
    guest: &GoalDistribution,
    home_ev: f64,
    guest_ev: f64,
    scoring: &ScoringSystem,
) -> Bet {
    let grid = ScoreGrid::new(home, guest, &Correction::LowScore { home_ev, guest_ev });
    best_bet(&grid, scoring)
}

#[cfg(test)]
mod tests;
