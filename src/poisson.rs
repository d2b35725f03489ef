//! Poisson goal-count distributions.

use serde::Serialize;
use std::ops::Index;

/// Highest goal count a distribution represents.
pub const MAX_GOALS: usize = 10;

/// Number of entries in a [`GoalDistribution`]: goal counts `0..=MAX_GOALS`.
pub const GOAL_SLOTS: usize = MAX_GOALS + 1;

const FACTORIALS: [u64; GOAL_SLOTS] = factorials();

const fn factorials() -> [u64; GOAL_SLOTS] {
    let mut table = [1u64; GOAL_SLOTS];
    let mut n = 2;
    while n < GOAL_SLOTS {
        table[n] = table[n - 1] * n as u64;
        n += 1;
    }
    table
}

/// Probability of exactly `k` events given an expected count of `lambda`. `k` must not exceed
/// [`MAX_GOALS`].
#[inline]
pub fn univariate(k: usize, lambda: f64) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / FACTORIALS[k] as f64
}

/// Fills `out[k]` with the probability of `k` goals, returning the evaluation cap: one past the
/// last entry whose probability exceeds `threshold`, but at least 1. Entries past the cap are
/// still filled.
pub fn fill(out: &mut [f64; GOAL_SLOTS], lambda: f64, threshold: f64) -> usize {
    let mut cap = 1;
    for (k, prob) in out.iter_mut().enumerate() {
        *prob = univariate(k, lambda);
        if *prob > threshold {
            cap = k + 1;
        }
    }
    cap
}

/// A fixed-length goal-count distribution with the number of leading entries worth evaluating
/// in a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalDistribution {
    probs: [f64; GOAL_SLOTS],
    cap: usize,
}
impl GoalDistribution {
    pub fn poisson(lambda: f64) -> Self {
        Self::poisson_with_threshold(lambda, 0.0)
    }

    pub fn poisson_with_threshold(lambda: f64, threshold: f64) -> Self {
        let mut probs = [0.0; GOAL_SLOTS];
        let cap = fill(&mut probs, lambda, threshold);
        Self { probs, cap }
    }

    /// An explicit distribution, evaluated in full.
    pub fn from_probs(probs: [f64; GOAL_SLOTS]) -> Self {
        Self {
            probs,
            cap: GOAL_SLOTS,
        }
    }

    /// Restricts evaluation to the first `cap` entries, clamped to `1..=GOAL_SLOTS`.
    pub fn with_cap(self, cap: usize) -> Self {
        Self {
            cap: cap.clamp(1, GOAL_SLOTS),
            ..self
        }
    }

    #[inline]
    pub fn probs(&self) -> &[f64; GOAL_SLOTS] {
        &self.probs
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }
}

impl Index<usize> for GoalDistribution {
    type Output = f64;

    #[inline]
    fn index(&self, goals: usize) -> &Self::Output {
        &self.probs[goals]
    }
}
