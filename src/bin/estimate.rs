use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use scoreline::date::MatchDate;
use scoreline::estimator::{Config, Estimation, MatchEstimator, DEFAULT_GOAL_CAP};
use scoreline::expectation::GoalEvModel;
use scoreline::ingest;
use scoreline::print;
use scoreline::scoring::ScoringSystem;
use scoreline::stats::Window;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV files with match results, in football-data.co.uk layout
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// home team
    #[clap(long)]
    home: Option<String>,

    /// guest team
    #[clap(long)]
    guest: Option<String>,

    /// only use matches strictly before this date (YYYYMMDD)
    #[clap(short = 'b', long)]
    before: Option<MatchDate>,

    /// points for the exact result
    #[clap(long, default_value_t = 4.0)]
    result: f64,

    /// points for the goal difference
    #[clap(long, default_value_t = 3.0)]
    difference: f64,

    /// points for the tendency
    #[clap(long, default_value_t = 2.0)]
    tendency: f64,

    /// blend location-specific and pooled expected goals with these weights
    #[clap(long, num_args = 2, value_names = ["SPECIFIC", "POOLED"])]
    combined: Option<Vec<f64>>,

    /// probability below which goal counts are left out of the best-bet search
    #[clap(long, default_value_t = 0.0)]
    threshold: f64,

    /// aggregate raw goal counts instead of capping them
    #[clap(long)]
    uncapped: bool,

    /// print every team's record
    #[clap(long)]
    teams: bool,

    /// print the goal distributions
    #[clap(long)]
    distributions: bool,

    /// print the estimation as JSON
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.home.is_some() != self.guest.is_some() {
            bail!("--home and --guest must be specified together");
        }
        if self.home.is_none() && !self.teams {
            bail!("either a fixture (--home and --guest) or --teams must be specified");
        }
        Ok(())
    }

    fn config(&self) -> Config {
        Config {
            scoring: ScoringSystem {
                result: self.result,
                difference: self.difference,
                tendency: self.tendency,
            },
            goal_cap: if self.uncapped {
                None
            } else {
                Some(DEFAULT_GOAL_CAP)
            },
            goal_ev: match self.combined.as_deref() {
                Some(&[w1, w2]) => GoalEvModel::Combined { w1, w2 },
                _ => GoalEvModel::Simple,
            },
            max_date: self.before,
            threshold: self.threshold,
        }
    }
}

#[derive(Debug, Serialize)]
struct Fixture<'a> {
    home_team: &'a str,
    guest_team: &'a str,
    #[serde(flatten)]
    estimation: &'a Estimation,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut estimator = MatchEstimator::with_config(args.config())?;
    for file in &args.files {
        ingest::load_matches(&mut estimator, file)?;
    }

    if args.teams {
        let window = Window::ALL.with_before(estimator.max_date());
        println!(
            "{}",
            Console::default().render(&print::tabulate_teams(&estimator, &window))
        );
    }

    if let (Some(home_team), Some(guest_team)) = (&args.home, &args.guest) {
        let estimation = estimator.estimate(home_team, guest_team)?;
        info!("{home_team} v {guest_team}: best bet {:?}", estimation.best_bet.score);
        if args.json {
            let fixture = Fixture {
                home_team,
                guest_team,
                estimation: &estimation,
            };
            println!("{}", serde_json::to_string_pretty(&fixture)?);
        } else {
            println!(
                "{}",
                Console::default().render(&print::tabulate_three_way(
                    home_team,
                    guest_team,
                    &estimation
                ))
            );
            println!(
                "{}",
                Console::default().render(&print::tabulate_summary(&estimation))
            );
            if args.distributions {
                println!(
                    "{}",
                    Console::default().render(&print::tabulate_distributions(&estimation))
                );
            }
        }
    }
    Ok(())
}
