//! Console tables for estimations, goal distributions and team records.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Cell, Col, Row, Table};
use ordinalizer::Ordinal;
use strum::{EnumCount, IntoEnumIterator};

use crate::estimator::{Estimation, MatchEstimator};
use crate::poisson::GOAL_SLOTS;
use crate::scoregrid::Score;
use crate::registry::TeamId;
use crate::stats::{Location, StatsStore, Tally, Window};

fn format_score(score: &Score) -> String {
    format!("{}:{}", score.home, score.away)
}

fn format_avg(tally: Option<Tally>, avg: fn(&Tally) -> f64) -> String {
    tally.map_or("-".into(), |tally| format!("{:.3}", avg(&tally)))
}

fn three_way_row(label: &str, values: [String; 3]) -> Row {
    let mut cells = vec![Cell::from(label)];
    cells.extend(values.into_iter().map(Cell::from));
    Row::new(Styles::default(), cells)
}

pub fn tabulate_three_way(home_team: &str, guest_team: &str, estimation: &Estimation) -> Table {
    let three_way = estimation.three_way.as_array();
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "".into(),
                home_team.into(),
                "Draw".into(),
                guest_team.into(),
            ],
        ));
    table.push_row(three_way_row(
        "Probability",
        three_way.map(|prob| format!("{prob:.4}")),
    ));
    table.push_row(three_way_row(
        "Fair price",
        three_way.map(|prob| format!("{:.2}", 1.0 / prob)),
    ));
    table
}

pub fn tabulate_summary(estimation: &Estimation) -> Table {
    let best_bet = &estimation.best_bet;
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(Left)),
        Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
    ]);
    for (key, value) in [
        (
            "Expected goals",
            format!("{:.3} : {:.3}", estimation.home_ev, estimation.guest_ev),
        ),
        (
            "Most likely",
            format!(
                "{} ({:.4})",
                format_score(&estimation.most_likely.score),
                estimation.most_likely.probability
            ),
        ),
        ("Best bet", format_score(&best_bet.score)),
        ("Best bet points", format!("{:.3}", best_bet.ev)),
        ("Best bet odds", format!("{:.4}", best_bet.odds)),
    ] {
        table.push_row(Row::new(Styles::default(), vec![key.into(), value.into()]));
    }
    table
}

/// One row per goal count; counts past a distribution's search cap are shown in brackets.
pub fn tabulate_distributions(estimation: &Estimation) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Goals".into(), "Home".into(), "Guest".into()],
        ));
    let format_prob = |prob: f64, goals: usize, cap: usize| {
        if goals < cap {
            format!("{prob:.4}")
        } else {
            format!("({prob:.4})")
        }
    };
    let (home, guest) = (&estimation.home_goals, &estimation.guest_goals);
    for goals in 0..GOAL_SLOTS {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                goals.to_string().into(),
                format_prob(home[goals], goals, home.cap()).into(),
                format_prob(guest[goals], goals, guest.cap()).into(),
            ],
        ));
    }
    table
}

/// A team's tallies indexed by [`Location`] ordinal; `None` where the window holds no matches.
fn location_tallies(
    stats: &StatsStore,
    team: TeamId,
    window: &Window,
) -> [Option<Tally>; Location::COUNT] {
    let mut tallies = [None; Location::COUNT];
    for location in Location::iter() {
        tallies[location.ordinal()] = stats.location_stats(team, location, window).ok();
    }
    tallies
}

/// Every registered team with its matches played, and scoring and conceding averages, within
/// `window` at each location.
pub fn tabulate_teams(estimator: &MatchEstimator, window: &Window) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![
                Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            ];
            for _ in 0..Location::COUNT * 3 {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(8)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells = vec!["Id".into(), "Team".into()];
            for location in Location::iter() {
                header_cells.push(format!("{location} P").into());
                header_cells.push(format!("{location} GF").into());
                header_cells.push(format!("{location} GA").into());
            }
            Row::new(Styles::default().with(Header(true)), header_cells)
        });
    let stats = estimator.stats();
    for (id, name) in estimator.teams().names().iter().enumerate() {
        let mut cells = vec![id.to_string().into(), name.as_str().into()];
        for tally in location_tallies(stats, id, window) {
            cells.push(tally.map_or(0, |tally| tally.matches).to_string().into());
            cells.push(format_avg(tally, Tally::goal_avg).into());
            cells.push(format_avg(tally, Tally::against_avg).into());
        }
        table.push_row(Row::new(Styles::default(), cells));
    }
    table
}
