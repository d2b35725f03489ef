//! The match estimator: a chronological match log, the team registry and the statistics derived
//! from them, kept together so that estimations always see a consistent history.

use anyhow::anyhow;
use serde::Serialize;
use std::error::Error;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace};

use crate::date::MatchDate;
use crate::expectation::GoalEvModel;
use crate::poisson::GoalDistribution;
use crate::registry::{TeamId, TeamRegistry};
use crate::scoregrid::{Correction, ProbableScore, ScoreGrid, ThreeWay};
use crate::scoring::ScoringSystem;
use crate::stats::{Location, MatchRecord, StatsError, StatsStore, Tally, TeamStats, Window};
use crate::tipping::{self, Bet};

/// Goals above this count contribute only this many to the aggregates.
pub const DEFAULT_GOAL_CAP: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scoring: ScoringSystem,
    pub goal_cap: Option<u8>,
    pub goal_ev: GoalEvModel,
    /// Only matches strictly before this date are used for estimation.
    pub max_date: Option<MatchDate>,
    /// Goal counts whose probability does not exceed this are left out of the best-bet search.
    pub threshold: f64,
}
impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ScoringSystem {
            result,
            difference,
            tendency,
        } = self.scoring;
        for (name, points) in [
            ("result", result),
            ("difference", difference),
            ("tendency", tendency),
        ] {
            if !points.is_finite() || points < 0.0 {
                return Err(anyhow!("{name} points must be a non-negative number, got {points}").into());
            }
        }

        if let GoalEvModel::Combined { w1, w2 } = self.goal_ev {
            if !w1.is_finite() || !w2.is_finite() {
                return Err(anyhow!("combined weights must be finite, got ({w1}, {w2})").into());
            }
        }

        if !(0.0..1.0).contains(&self.threshold) {
            return Err(anyhow!("threshold must lie in [0, 1), got {}", self.threshold).into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringSystem::default(),
            goal_cap: Some(DEFAULT_GOAL_CAP),
            goal_ev: GoalEvModel::default(),
            max_date: None,
            threshold: 0.0,
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(#[from] pub Box<dyn Error + Send + Sync>);

impl From<anyhow::Error> for ConfigError {
    fn from(value: anyhow::Error) -> Self {
        ConfigError(value.into())
    }
}

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("unknown team '{0}'")]
    UnknownTeam(String),

    #[error("invalid team id {0}")]
    InvalidTeamId(TeamId),

    #[error("{0}")]
    Stats(#[from] StatsError),

    #[error("{side} goal expectation is not finite: {value}")]
    NonFiniteGoalEv { side: Location, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub home_ev: f64,
    pub guest_ev: f64,
    pub home_goals: GoalDistribution,
    pub guest_goals: GoalDistribution,
    pub three_way: ThreeWay,
    pub most_likely: ProbableScore,
    pub best_bet: Bet,
}

/// Owns the match log and everything derived from it.
///
/// Adding a match bumps a revision counter. The statistics remember the revision they were
/// built from, and an estimation against stale statistics rebuilds them first.
#[derive(Debug, Default)]
pub struct MatchEstimator {
    config: Config,
    matches: Vec<MatchRecord>,
    teams: TeamRegistry,
    stats: StatsStore,
    revision: u64,
    stats_revision: u64,
}
impl MatchEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Restricts estimation to matches strictly before `date`; `None` uses the full history.
    pub fn set_max_date(&mut self, date: Option<MatchDate>) {
        self.config.max_date = date;
    }

    pub fn max_date(&self) -> Option<MatchDate> {
        self.config.max_date
    }

    /// Records a match, registering either team if it is new. The log stays in ascending date
    /// order, with a match placed after any already logged on the same date.
    ///
    /// The statistics are not updated until [`Self::recalculate_team_statistics`] is called or
    /// an estimation finds them stale.
    pub fn add_match(
        &mut self,
        date: MatchDate,
        home_team: &str,
        guest_team: &str,
        home_goals: u8,
        guest_goals: u8,
    ) -> MatchRecord {
        let record = MatchRecord {
            date,
            home_team: self.teams.register(home_team),
            guest_team: self.teams.register(guest_team),
            home_goals,
            guest_goals,
        };
        let index = self.matches.partition_point(|logged| logged.date <= date);
        self.matches.insert(index, record);
        self.revision += 1;
        record
    }

    /// Rebuilds the statistics from the entire match log.
    pub fn recalculate_team_statistics(&mut self) -> Result<(), StatsError> {
        let start = Instant::now();
        self.stats.clear();
        self.stats.set_team_count(self.teams.len());
        self.stats.add_matches(&self.matches, self.config.goal_cap)?;
        self.stats_revision = self.revision;
        debug!(
            "rebuilt statistics for {} matches across {} teams in {:?}",
            self.matches.len(),
            self.teams.len(),
            start.elapsed()
        );
        Ok(())
    }

    /// Whether matches were added since the statistics were last rebuilt.
    pub fn is_stale(&self) -> bool {
        self.stats_revision != self.revision
    }

    /// Whether the named team has home history before the cut-off date. Stale statistics are
    /// bypassed in favour of the match log, so the answer always reflects every added match.
    pub fn has_home_statistics(&self, team: &str) -> bool {
        self.teams.id_of(team).map_or(false, |id| {
            if self.is_stale() {
                self.logged_before(|record| record.home_team == id)
            } else {
                self.stats.has_home_stats(id, self.config.max_date)
            }
        })
    }

    pub fn has_guest_statistics(&self, team: &str) -> bool {
        self.teams.id_of(team).map_or(false, |id| {
            if self.is_stale() {
                self.logged_before(|record| record.guest_team == id)
            } else {
                self.stats.has_guest_stats(id, self.config.max_date)
            }
        })
    }

    fn logged_before(&self, predicate: impl Fn(&MatchRecord) -> bool) -> bool {
        let end = match self.config.max_date {
            None => self.matches.len(),
            Some(before) => self.matches.partition_point(|record| record.date < before),
        };
        self.matches[..end].iter().any(predicate)
    }

    pub fn estimate(&mut self, home_team: &str, guest_team: &str) -> Result<Estimation, EstimateError> {
        let home = self.require_team(home_team)?;
        let guest = self.require_team(guest_team)?;
        self.estimate_by_id(home, guest)
    }

    pub fn estimate_by_id(&mut self, home: TeamId, guest: TeamId) -> Result<Estimation, EstimateError> {
        for team in [home, guest] {
            if team >= self.teams.len() {
                return Err(EstimateError::InvalidTeamId(team));
            }
        }
        if self.is_stale() {
            self.recalculate_team_statistics()?;
        }

        let window = Window::ALL.with_before(self.config.max_date);
        let league = self.stats.league_stats(&window)?;
        let (home_stats, guest_stats) = if self.config.goal_ev.pools_locations() {
            (
                self.stats.team_stats(home, &window)?,
                self.stats.team_stats(guest, &window)?,
            )
        } else {
            (
                TeamStats {
                    home: self.stats.home_stats(home, &window)?,
                    away: Tally::default(),
                },
                TeamStats {
                    home: Tally::default(),
                    away: self.stats.guest_stats(guest, &window)?,
                },
            )
        };

        let model = &self.config.goal_ev;
        let home_ev = finite(
            Location::Home,
            model.home_goal_ev(&home_stats, &guest_stats, &league),
        )?;
        let guest_ev = finite(
            Location::Away,
            model.guest_goal_ev(&home_stats, &guest_stats, &league),
        )?;

        let home_goals = GoalDistribution::poisson_with_threshold(home_ev, self.config.threshold);
        let guest_goals = GoalDistribution::poisson_with_threshold(guest_ev, self.config.threshold);
        let grid = ScoreGrid::new(
            &home_goals,
            &guest_goals,
            &Correction::LowScore { home_ev, guest_ev },
        );
        let estimation = Estimation {
            home_ev,
            guest_ev,
            home_goals,
            guest_goals,
            three_way: grid.three_way(),
            most_likely: grid.most_likely(),
            best_bet: tipping::best_bet(&grid, &self.config.scoring),
        };
        trace!(
            "estimated {} v {}: {estimation:?}",
            &self.teams[home],
            &self.teams[guest]
        );
        Ok(estimation)
    }

    /// Drops every match, team and statistic.
    pub fn clear(&mut self) {
        self.stats.clear();
        self.matches.clear();
        self.teams.clear();
        self.revision += 1;
        self.stats_revision = self.revision;
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn team_name(&self, id: TeamId) -> Option<&str> {
        self.teams.name_of(id)
    }

    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.teams.id_of(name)
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    fn require_team(&self, name: &str) -> Result<TeamId, EstimateError> {
        self.teams
            .id_of(name)
            .ok_or_else(|| EstimateError::UnknownTeam(name.to_string()))
    }
}

fn finite(side: Location, value: f64) -> Result<f64, EstimateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimateError::NonFiniteGoalEv { side, value })
    }
}
