//! Poisson match-outcome estimation from historical results.
//! Keeps a time-series statistics store of goals scored and conceded per team, derives expected
//! goals for a fixture, and picks the score prediction with the highest expected points under a
//! tipping scoring system.

pub mod csv;
pub mod date;
pub mod estimator;
pub mod expectation;
pub mod ingest;
pub mod poisson;
pub mod print;
pub mod registry;
pub mod scoregrid;
pub mod scoring;
pub mod stats;
pub mod tipping;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
