//! Time-series statistics over match results.
//!
//! [`StatsStore`] keeps, per team and for the league as a whole, cumulative (prefix-sum) series of
//! goals scored and conceded alongside the ascending dates at which they were recorded. Any
//! aggregate over "the last _N_ matches", "all matches before a date", or both, then reduces to a
//! binary search for the window's end and a subtraction of two prefix sums.

use ordinalizer::Ordinal;
use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

use crate::date::MatchDate;
use crate::registry::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Location {
    Home,
    Away,
    Total,
}

/// A single match result. Immutable once created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    pub date: MatchDate,
    pub home_team: TeamId,
    pub guest_team: TeamId,
    pub home_goals: u8,
    pub guest_goals: u8,
}

/// Goals scored and conceded over a number of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub goals: u32,
    pub against: u32,
    pub matches: usize,
}
impl Tally {
    /// Average goals scored. Non-finite if the tally is empty.
    #[inline]
    pub fn goal_avg(&self) -> f64 {
        self.goals as f64 / self.matches as f64
    }

    /// Average goals conceded. Non-finite if the tally is empty.
    #[inline]
    pub fn against_avg(&self) -> f64 {
        self.against as f64 / self.matches as f64
    }

    pub fn merge(&self, other: &Tally) -> Tally {
        Tally {
            goals: self.goals + other.goals,
            against: self.against + other.against,
            matches: self.matches + other.matches,
        }
    }

    fn add(&mut self, goals: u8, against: u8) {
        self.goals += goals as u32;
        self.against += against as u32;
        self.matches += 1;
    }
}

/// Per-team snapshot. The [`Location::Total`] figures are derived from the pooled raw totals of
/// both locations, not by averaging the two averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub home: Tally,
    pub away: Tally,
}
impl TeamStats {
    pub fn tally(&self, location: Location) -> Tally {
        match location {
            Location::Home => self.home,
            Location::Away => self.away,
            Location::Total => self.home.merge(&self.away),
        }
    }

    #[inline]
    pub fn goal_avg(&self, location: Location) -> f64 {
        self.tally(location).goal_avg()
    }

    #[inline]
    pub fn against_avg(&self, location: Location) -> f64 {
        self.tally(location).against_avg()
    }

    #[inline]
    pub fn match_count(&self, location: Location) -> usize {
        self.tally(location).matches
    }
}

/// League-wide snapshot, taken from the designated home side's perspective of every match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeagueStats {
    pub home_goals: u32,
    pub away_goals: u32,
    pub matches: usize,
}
impl LeagueStats {
    /// The [`Location::Total`] average is the mean of the home and away averages.
    pub fn goal_avg(&self, location: Location) -> f64 {
        let home = self.home_goals as f64 / self.matches as f64;
        let away = self.away_goals as f64 / self.matches as f64;
        match location {
            Location::Home => home,
            Location::Away => away,
            Location::Total => 0.5 * (home + away),
        }
    }

    #[inline]
    pub fn match_count(&self) -> usize {
        self.matches
    }

    fn add(&mut self, home_goals: u8, away_goals: u8) {
        self.home_goals += home_goals as u32;
        self.away_goals += away_goals as u32;
        self.matches += 1;
    }
}

/// Selects the matches a query aggregates over: optionally only those strictly before a date,
/// and optionally only the most recent of those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub before: Option<MatchDate>,
    pub last: Option<usize>,
}
impl Window {
    pub const ALL: Window = Window {
        before: None,
        last: None,
    };

    pub fn last(matches: usize) -> Self {
        Self {
            before: None,
            last: Some(matches),
        }
    }

    pub fn before(date: MatchDate) -> Self {
        Self {
            before: Some(date),
            last: None,
        }
    }

    pub fn with_before(self, date: Option<MatchDate>) -> Self {
        Self {
            before: date,
            ..self
        }
    }

    pub fn with_last(self, matches: usize) -> Self {
        Self {
            last: Some(matches),
            ..self
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("unknown team {0}")]
    UnknownTeam(TeamId),

    #[error("team {team} has no {location} matches in the queried window")]
    NoHistory { team: TeamId, location: Location },

    #[error("no league matches in the queried window")]
    NoLeagueHistory,

    #[error("match {index} dated {date} precedes {previous}")]
    UnsortedMatches {
        index: usize,
        date: MatchDate,
        previous: MatchDate,
    },
}

#[derive(Debug, Clone, Default)]
struct Series {
    goals: Vec<u32>,
    against: Vec<u32>,
    dates: Vec<MatchDate>,
}
impl Series {
    fn push(&mut self, date: MatchDate, goals: u8, against: u8) {
        fn accumulate(sums: &mut Vec<u32>, value: u8) {
            let last = sums.last().copied().unwrap_or(0);
            sums.push(last + value as u32);
        }
        accumulate(&mut self.goals, goals);
        accumulate(&mut self.against, against);
        self.dates.push(date);
    }

    #[inline]
    fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    fn last_date(&self) -> Option<MatchDate> {
        self.dates.last().copied()
    }

    /// One past the last entry recorded strictly before `before`.
    #[inline]
    fn end(&self, before: Option<MatchDate>) -> usize {
        match before {
            None => self.len(),
            Some(before) => self.dates.partition_point(|&date| date < before),
        }
    }

    fn tally(&self, window: &Window) -> Option<Tally> {
        let end = self.end(window.before);
        let matches = window.last.map_or(end, |last| usize::min(last, end));
        if matches == 0 {
            return None;
        }

        let start = end - matches;
        let sum = |sums: &[u32]| {
            let preceding = if start > 0 { sums[start - 1] } else { 0 };
            sums[end - 1] - preceding
        };
        Some(Tally {
            goals: sum(&self.goals),
            against: sum(&self.against),
            matches,
        })
    }
}

#[derive(Debug, Clone, Default)]
struct TeamSeries {
    home: Series,
    away: Series,
}

#[derive(Debug, Clone, Default)]
pub struct StatsStore {
    teams: Vec<TeamSeries>,
    league: Series,
}
impl StatsStore {
    pub fn with_team_count(team_count: usize) -> Self {
        let mut store = Self::default();
        store.set_team_count(team_count);
        store
    }

    /// Allocates empty series for `team_count` teams.
    pub fn set_team_count(&mut self, team_count: usize) {
        self.teams.resize_with(team_count, Default::default);
    }

    pub fn clear(&mut self) {
        self.teams.clear();
        self.league = Series::default();
    }

    pub fn match_count(&self) -> usize {
        self.league.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Appends `matches`, which must be in ascending date order and must not precede anything
    /// already stored. Team storage grows to fit the largest id referenced. With a `goal_cap`,
    /// goal counts above the cap contribute only the cap to the aggregates.
    ///
    /// The batch is checked before anything is appended, so an [`StatsError::UnsortedMatches`]
    /// error leaves the store untouched.
    pub fn add_matches(
        &mut self,
        matches: &[MatchRecord],
        goal_cap: Option<u8>,
    ) -> Result<(), StatsError> {
        let mut previous = self.league.last_date();
        let mut required_teams = self.teams.len();
        for (index, record) in matches.iter().enumerate() {
            if let Some(previous) = previous {
                if record.date < previous {
                    return Err(StatsError::UnsortedMatches {
                        index,
                        date: record.date,
                        previous,
                    });
                }
            }
            previous = Some(record.date);
            required_teams = required_teams.max(record.home_team.max(record.guest_team) + 1);
        }
        if required_teams > self.teams.len() {
            self.set_team_count(required_teams);
        }

        let cap = |goals: u8| goal_cap.map_or(goals, |cap| u8::min(goals, cap));
        for record in matches {
            let (home_goals, guest_goals) = (cap(record.home_goals), cap(record.guest_goals));
            self.teams[record.home_team]
                .home
                .push(record.date, home_goals, guest_goals);
            self.teams[record.guest_team]
                .away
                .push(record.date, guest_goals, home_goals);
            self.league.push(record.date, home_goals, guest_goals);
        }
        Ok(())
    }

    /// Whether `team` played at least one home match (before `before`, if given). Unknown teams
    /// have no statistics.
    pub fn has_home_stats(&self, team: TeamId, before: Option<MatchDate>) -> bool {
        self.teams
            .get(team)
            .map_or(false, |series| series.home.end(before) > 0)
    }

    pub fn has_guest_stats(&self, team: TeamId, before: Option<MatchDate>) -> bool {
        self.teams
            .get(team)
            .map_or(false, |series| series.away.end(before) > 0)
    }

    pub fn home_stats(&self, team: TeamId, window: &Window) -> Result<Tally, StatsError> {
        self.team_series(team)?
            .home
            .tally(window)
            .ok_or(StatsError::NoHistory {
                team,
                location: Location::Home,
            })
    }

    pub fn guest_stats(&self, team: TeamId, window: &Window) -> Result<Tally, StatsError> {
        self.team_series(team)?
            .away
            .tally(window)
            .ok_or(StatsError::NoHistory {
                team,
                location: Location::Away,
            })
    }

    /// Home and away statistics together; the team needs history at both locations.
    pub fn team_stats(&self, team: TeamId, window: &Window) -> Result<TeamStats, StatsError> {
        Ok(TeamStats {
            home: self.home_stats(team, window)?,
            away: self.guest_stats(team, window)?,
        })
    }

    /// Statistics at a single location; [`Location::Total`] pools both and needs history at each.
    pub fn location_stats(
        &self,
        team: TeamId,
        location: Location,
        window: &Window,
    ) -> Result<Tally, StatsError> {
        match location {
            Location::Home => self.home_stats(team, window),
            Location::Away => self.guest_stats(team, window),
            Location::Total => Ok(self.team_stats(team, window)?.tally(Location::Total)),
        }
    }

    pub fn league_stats(&self, window: &Window) -> Result<LeagueStats, StatsError> {
        self.league
            .tally(window)
            .map(|tally| LeagueStats {
                home_goals: tally.goals,
                away_goals: tally.against,
                matches: tally.matches,
            })
            .ok_or(StatsError::NoLeagueHistory)
    }

    fn team_series(&self, team: TeamId) -> Result<&TeamSeries, StatsError> {
        self.teams.get(team).ok_or(StatsError::UnknownTeam(team))
    }
}

/// Per-team and league statistics computed in a single pass over an entire match set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub teams: Vec<TeamStats>,
    pub league: LeagueStats,
}

/// Builds [`Aggregate`] statistics from raw (uncapped) goals. Teams without home or away matches
/// are kept, and their averages for that location are non-finite.
pub fn aggregate(matches: &[MatchRecord], team_count: usize) -> Result<Aggregate, StatsError> {
    let mut teams = vec![TeamStats::default(); team_count];
    let mut league = LeagueStats::default();
    for record in matches {
        for team in [record.home_team, record.guest_team] {
            if team >= team_count {
                return Err(StatsError::UnknownTeam(team));
            }
        }
        teams[record.home_team]
            .home
            .add(record.home_goals, record.guest_goals);
        teams[record.guest_team]
            .away
            .add(record.guest_goals, record.home_goals);
        league.add(record.home_goals, record.guest_goals);
    }
    Ok(Aggregate { teams, league })
}
