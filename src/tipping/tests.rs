use super::*;
use crate::poisson::GOAL_SLOTS;
use assert_float_eq::*;

fn distribution(leading: &[f64]) -> GoalDistribution {
    let mut probs = [0.0; GOAL_SLOTS];
    probs[..leading.len()].copy_from_slice(leading);
    GoalDistribution::from_probs(probs)
}

fn uncorrected(home: &[f64], guest: &[f64]) -> ScoreGrid {
    ScoreGrid::new(&distribution(home), &distribution(guest), &Correction::None)
}

#[test]
fn bet_ev_of_explicit_grid() {
    let grid = uncorrected(&[0.5, 0.5], &[1.0]);
    let scoring = ScoringSystem::default();
    // 1-0 is exact half the time; a 0-0 is a wrong direction
    assert_float_relative_eq!(2.0, bet_ev(&Score::new(1, 0), &grid, &scoring));
    // 0-0 is exact half the time; a 1-0 does not match a predicted draw
    assert_float_relative_eq!(2.0, bet_ev(&Score::new(0, 0), &grid, &scoring));
    // 2-0 has the tendency of a 1-0
    assert_float_relative_eq!(1.0, bet_ev(&Score::new(2, 0), &grid, &scoring));
    // 2-1 has the difference of a 1-0
    assert_float_relative_eq!(1.5, bet_ev(&Score::new(2, 1), &grid, &scoring));
    assert_eq!(0.0, bet_ev(&Score::new(0, 1), &grid, &scoring));
}

#[test]
fn best_bet_first_found_wins_ties() {
    let grid = uncorrected(&[0.5, 0.5], &[1.0]);
    let bet = best_bet(&grid, &ScoringSystem::default());
    assert_eq!(Score::new(0, 0), bet.score);
    assert_float_relative_eq!(2.0, bet.ev);
    assert_float_relative_eq!(0.5, bet.odds);
}

#[test]
fn best_bet_without_points_defaults_to_nil_all() {
    let grid = uncorrected(&[0.2, 0.5, 0.3], &[0.6, 0.4]);
    let scoring = ScoringSystem {
        result: 0.0,
        difference: 0.0,
        tendency: 0.0,
    };
    let bet = best_bet(&grid, &scoring);
    assert_eq!(Score::new(0, 0), bet.score);
    assert_eq!(0.0, bet.ev);
    assert_float_relative_eq!(0.12, bet.odds);
}

#[test]
fn best_bet_matches_brute_force() {
    let (home_ev, guest_ev) = (1.45, 1.2);
    let home = GoalDistribution::poisson(home_ev);
    let guest = GoalDistribution::poisson(guest_ev);
    let grid = ScoreGrid::new(&home, &guest, &Correction::LowScore { home_ev, guest_ev });
    let scoring = ScoringSystem::default();

    let mut max_ev = f64::MIN;
    for home_goals in 0..GOAL_SLOTS as u8 {
        for guest_goals in 0..GOAL_SLOTS as u8 {
            max_ev = max_ev.max(bet_ev(&Score::new(home_goals, guest_goals), &grid, &scoring));
        }
    }

    let bet = best_bet(&grid, &scoring);
    assert_eq!(max_ev, bet.ev);
    assert_eq!(grid.prob(&bet.score), bet.odds);
    assert_eq!(bet, best_corrected_bet(&home, &guest, home_ev, guest_ev, &scoring));
}

#[test]
fn odds_are_corrected_probability_not_ev() {
    let (home_ev, guest_ev) = (1.0, 1.0);
    let home = GoalDistribution::poisson(home_ev);
    let guest = GoalDistribution::poisson(guest_ev);
    let bet = best_corrected_bet(&home, &guest, home_ev, guest_ev, &ScoringSystem::default());
    let expected_odds = home[bet.score.home as usize]
        * guest[bet.score.away as usize]
        * crate::scoregrid::low_score_factor(
            bet.score.home as usize,
            bet.score.away as usize,
            home_ev,
            guest_ev,
        );
    assert_float_relative_eq!(expected_odds, bet.odds, 1e-12);
    assert_ne!(bet.ev, bet.odds);
}

#[test]
fn strong_favourite_is_tipped_to_win() {
    let (home_ev, guest_ev) = (2.5, 0.6);
    let home = GoalDistribution::poisson(home_ev);
    let guest = GoalDistribution::poisson(guest_ev);
    let bet = best_corrected_bet(&home, &guest, home_ev, guest_ev, &ScoringSystem::default());
    assert!(bet.score.home > bet.score.away, "{bet:?}");
    assert!(bet.ev > 0.0);
}

#[test]
fn caps_bound_the_search() {
    let home = GoalDistribution::poisson(2.5).with_cap(1);
    let guest = GoalDistribution::poisson(0.6).with_cap(2);
    let grid = ScoreGrid::new(&home, &guest, &Correction::None);
    let bet = best_bet(&grid, &ScoringSystem::default());
    assert_eq!(0, bet.score.home);
    assert!(bet.score.away < 2);

    // outcomes beyond the caps carry no points
    let manual: f64 = (0..1)
        .flat_map(|home_goals| (0..2).map(move |guest_goals| (home_goals, guest_goals)))
        .map(|(home_goals, guest_goals)| {
            grid[(home_goals, guest_goals)]
                * ScoringSystem::default().points(
                    &bet.score,
                    &Score::new(home_goals as u8, guest_goals as u8),
                )
        })
        .sum();
    assert_float_relative_eq!(manual, bet.ev, 1e-12);
}
