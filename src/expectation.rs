//! Expected goals from attack strength, defence weakness and the league average.

use serde::Serialize;

use crate::stats::{LeagueStats, Location, TeamStats};

/// `attacker_goal_avg × defender_against_avg / league_goal_avg`.
#[inline]
pub fn goal_ev(attacker_goal_avg: f64, defender_against_avg: f64, league_goal_avg: f64) -> f64 {
    attacker_goal_avg * defender_against_avg / league_goal_avg
}

/// Uses only the home team's home record, the guest team's away record and the league home
/// average.
pub fn home_goal_ev_simple(home: &TeamStats, guest: &TeamStats, league: &LeagueStats) -> f64 {
    goal_ev(
        home.goal_avg(Location::Home),
        guest.against_avg(Location::Away),
        league.goal_avg(Location::Home),
    )
}

pub fn guest_goal_ev_simple(home: &TeamStats, guest: &TeamStats, league: &LeagueStats) -> f64 {
    goal_ev(
        guest.goal_avg(Location::Away),
        home.against_avg(Location::Home),
        league.goal_avg(Location::Away),
    )
}

/// Blends the location-specific estimate (weighted by `w1`) with one pooled over both locations
/// (weighted by `w2`).
pub fn home_goal_ev_combined(
    home: &TeamStats,
    guest: &TeamStats,
    league: &LeagueStats,
    w1: f64,
    w2: f64,
) -> f64 {
    let specific = home_goal_ev_simple(home, guest, league);
    let pooled = goal_ev(
        home.goal_avg(Location::Total),
        guest.against_avg(Location::Total),
        league.goal_avg(Location::Total),
    );
    w1 * specific + w2 * pooled
}

pub fn guest_goal_ev_combined(
    home: &TeamStats,
    guest: &TeamStats,
    league: &LeagueStats,
    w1: f64,
    w2: f64,
) -> f64 {
    let specific = guest_goal_ev_simple(home, guest, league);
    let pooled = goal_ev(
        guest.goal_avg(Location::Total),
        home.against_avg(Location::Total),
        league.goal_avg(Location::Total),
    );
    w1 * specific + w2 * pooled
}

/// Selects how expected goals are derived from the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum GoalEvModel {
    #[default]
    Simple,
    Combined {
        w1: f64,
        w2: f64,
    },
}
impl GoalEvModel {
    /// Whether the model needs both home and away history for each team. The simple model only
    /// reads the home team's home record and the guest team's away record.
    pub fn pools_locations(&self) -> bool {
        matches!(self, GoalEvModel::Combined { .. })
    }

    pub fn home_goal_ev(&self, home: &TeamStats, guest: &TeamStats, league: &LeagueStats) -> f64 {
        match self {
            GoalEvModel::Simple => home_goal_ev_simple(home, guest, league),
            GoalEvModel::Combined { w1, w2 } => home_goal_ev_combined(home, guest, league, *w1, *w2),
        }
    }

    pub fn guest_goal_ev(&self, home: &TeamStats, guest: &TeamStats, league: &LeagueStats) -> f64 {
        match self {
            GoalEvModel::Simple => guest_goal_ev_simple(home, guest, league),
            GoalEvModel::Combined { w1, w2 } => {
                guest_goal_ev_combined(home, guest, league, *w1, *w2)
            }
        }
    }
}
