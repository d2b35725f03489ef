//! Joint score probabilities derived from a pair of goal distributions.

use serde::Serialize;
use std::ops::Index;

use crate::poisson::{GoalDistribution, GOAL_SLOTS};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    /// Home goals less away goals.
    #[inline]
    pub fn difference(&self) -> i16 {
        self.home as i16 - self.away as i16
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProbableScore {
    pub score: Score,
    pub probability: f64,
}

/// Adjusts the product of two independent goal probabilities in the low-score region, where
/// home and away goal counts are observed to be mildly dependent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    None,
    LowScore { home_ev: f64, guest_ev: f64 },
}
impl Correction {
    #[inline]
    pub fn factor(&self, home_goals: usize, guest_goals: usize) -> f64 {
        match self {
            Correction::None => 1.0,
            Correction::LowScore { home_ev, guest_ev } => {
                low_score_factor(home_goals, guest_goals, *home_ev, *guest_ev)
            }
        }
    }
}

#[inline]
pub fn low_score_factor(home_goals: usize, guest_goals: usize, home_ev: f64, guest_ev: f64) -> f64 {
    match (home_goals, guest_goals) {
        (0, 0) => 1.0 + 0.1 * home_ev * guest_ev,
        (1, 1) => 1.1,
        (1, 0) => 1.0 - 0.1 * guest_ev,
        (0, 1) => 1.0 - 0.1 * home_ev,
        _ => 1.0,
    }
}

/// Probability of a home win, a draw and an away win, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThreeWay {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}
impl ThreeWay {
    pub fn as_array(&self) -> [f64; 3] {
        [self.home_win, self.draw, self.away_win]
    }

    pub fn sum(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// Joint probability of every score up to the maximum goal count, indexed by
/// `(home_goals, guest_goals)`. Carries the evaluation caps of the source distributions.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGrid {
    probs: [[f64; GOAL_SLOTS]; GOAL_SLOTS],
    home_cap: usize,
    guest_cap: usize,
}
impl ScoreGrid {
    pub fn new(home: &GoalDistribution, guest: &GoalDistribution, correction: &Correction) -> Self {
        let mut probs = [[0.0; GOAL_SLOTS]; GOAL_SLOTS];
        for (home_goals, row) in probs.iter_mut().enumerate() {
            for (guest_goals, prob) in row.iter_mut().enumerate() {
                *prob = home[home_goals]
                    * guest[guest_goals]
                    * correction.factor(home_goals, guest_goals);
            }
        }
        Self {
            probs,
            home_cap: home.cap(),
            guest_cap: guest.cap(),
        }
    }

    #[inline]
    pub fn home_cap(&self) -> usize {
        self.home_cap
    }

    #[inline]
    pub fn guest_cap(&self) -> usize {
        self.guest_cap
    }

    #[inline]
    pub fn prob(&self, score: &Score) -> f64 {
        self.probs[score.home as usize][score.away as usize]
    }

    pub fn three_way(&self) -> ThreeWay {
        let mut three_way = ThreeWay::default();
        for (home_goals, row) in self.probs.iter().enumerate() {
            for (guest_goals, &prob) in row.iter().enumerate() {
                if home_goals > guest_goals {
                    three_way.home_win += prob;
                } else if home_goals == guest_goals {
                    three_way.draw += prob;
                } else {
                    three_way.away_win += prob;
                }
            }
        }
        three_way
    }

    /// The single most probable score. Earlier scores (in row-major order) win ties.
    pub fn most_likely(&self) -> ProbableScore {
        let mut most_likely = ProbableScore {
            score: Score::default(),
            probability: self.probs[0][0],
        };
        for (home_goals, row) in self.probs.iter().enumerate() {
            for (guest_goals, &prob) in row.iter().enumerate() {
                if prob > most_likely.probability {
                    most_likely = ProbableScore {
                        score: Score::new(home_goals as u8, guest_goals as u8),
                        probability: prob,
                    };
                }
            }
        }
        most_likely
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().flatten().sum()
    }
}

impl Index<(usize, usize)> for ScoreGrid {
    type Output = f64;

    #[inline]
    fn index(&self, (home_goals, guest_goals): (usize, usize)) -> &Self::Output {
        &self.probs[home_goals][guest_goals]
    }
}

/// Three-way probability assuming independent goal counts.
pub fn three_way(home: &GoalDistribution, guest: &GoalDistribution) -> ThreeWay {
    ScoreGrid::new(home, guest, &Correction::None).three_way()
}

/// Three-way probability with the low-score correction applied.
pub fn three_way_corrected(
    home: &GoalDistribution,
    guest: &GoalDistribution,
    home_ev: f64,
    guest_ev: f64,
) -> ThreeWay {
    ScoreGrid::new(home, guest, &Correction::LowScore { home_ev, guest_ev }).three_way()
}
