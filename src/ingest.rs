//! Loading match results from football-data.co.uk style CSV files.
//!
//! The first line is a header. Columns are located by their header names (`Date`, `HomeTeam`,
//! `AwayTeam`, `FTHG`, `FTAG`, or the shorter `Home`, `Away`, `HG`, `AG`), falling back to the
//! classic `Div,Date,HomeTeam,AwayTeam,FTHG,FTAG` positions for any name that is absent.

use std::io;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::csv::CsvReader;
use crate::date::{parse_dmy, MatchDate};
use crate::estimator::MatchEstimator;
use crate::stats::StatsError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: invalid goal count '{value}'")]
    InvalidGoals { line: usize, value: String },

    #[error("{0}")]
    Stats(#[from] StatsError),
}

/// A parsed result row, with teams still identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub date: MatchDate,
    pub home_team: String,
    pub guest_team: String,
    pub home_goals: u8,
    pub guest_goals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    home_team: usize,
    guest_team: usize,
    home_goals: usize,
    guest_goals: usize,
}
impl Columns {
    fn from_header(header: &[String]) -> Self {
        let find = |names: &[&str], default: usize| {
            header
                .iter()
                .position(|column| names.contains(&column.trim()))
                .unwrap_or(default)
        };
        Self {
            date: find(&["Date"], 1),
            home_team: find(&["HomeTeam", "Home"], 2),
            guest_team: find(&["AwayTeam", "Away"], 3),
            home_goals: find(&["FTHG", "HG"], 4),
            guest_goals: find(&["FTAG", "AG"], 5),
        }
    }
}

/// Parses every row of `reader`, failing on the first malformed one. Blank rows are skipped.
pub fn read_matches(reader: impl BufRead) -> Result<Vec<MatchRow>, LoadError> {
    read_csv(CsvReader::from_reader(reader))
}

fn read_csv<R: BufRead>(mut csv: CsvReader<R>) -> Result<Vec<MatchRow>, LoadError> {
    let columns = match csv.read() {
        None => return Ok(vec![]),
        Some(header) => Columns::from_header(&header?),
    };
    debug!("columns: {columns:?}");

    let mut rows = vec![];
    for (index, record) in csv.enumerate() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(parse_row(&record, &columns, index + 2)?);
    }
    Ok(rows)
}

fn parse_row(record: &[String], columns: &Columns, line: usize) -> Result<MatchRow, LoadError> {
    let field = |index: usize, name: &'static str| {
        record
            .get(index)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or(LoadError::MissingField { line, field: name })
    };
    let goals = |index: usize, name: &'static str| {
        let value = field(index, name)?;
        value.parse::<u8>().map_err(|_| LoadError::InvalidGoals {
            line,
            value: value.to_string(),
        })
    };

    let date = field(columns.date, "Date")?;
    let date = parse_dmy(date).map_err(|_| LoadError::InvalidDate {
        line,
        value: date.to_string(),
    })?;
    Ok(MatchRow {
        date,
        home_team: field(columns.home_team, "HomeTeam")?.to_string(),
        guest_team: field(columns.guest_team, "AwayTeam")?.to_string(),
        home_goals: goals(columns.home_goals, "FTHG")?,
        guest_goals: goals(columns.guest_goals, "FTAG")?,
    })
}

/// Adds every row to the estimator and rebuilds its statistics once.
pub fn add_rows(estimator: &mut MatchEstimator, rows: &[MatchRow]) -> Result<(), StatsError> {
    for row in rows {
        estimator.add_match(
            row.date,
            &row.home_team,
            &row.guest_team,
            row.home_goals,
            row.guest_goals,
        );
    }
    estimator.recalculate_team_statistics()
}

/// Loads results from `reader` into the estimator. Nothing is added unless every row parses.
/// Returns the number of matches loaded.
pub fn load_matches_from(
    estimator: &mut MatchEstimator,
    reader: impl BufRead,
) -> Result<usize, LoadError> {
    let rows = read_matches(reader)?;
    add_rows(estimator, &rows)?;
    Ok(rows.len())
}

pub fn load_matches(
    estimator: &mut MatchEstimator,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    let start = Instant::now();
    let path = path.as_ref();
    let csv = CsvReader::open(path)?;
    let rows = read_csv(csv)?;
    add_rows(estimator, &rows)?;
    info!(
        "loaded {} matches from {} in {:?}; {} matches and {} teams in total",
        rows.len(),
        path.display(),
        start.elapsed(),
        estimator.match_count(),
        estimator.team_count()
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::compose;

    const BUNDESLIGA: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR
D1,24/08/18,Bayern Munich,Hoffenheim,3,1,H
D1,25/08/18,Hertha,Nurnberg,1,0,H
D1,25/08/18,Bremen,Hannover,1,1,D
D1,01/09/18,Hannover,Dortmund,0,0,D
,,,,,,
";

    #[test]
    fn read_football_data_layout() {
        let rows = read_matches(BUNDESLIGA.as_bytes()).unwrap();
        assert_eq!(4, rows.len());
        assert_eq!(
            MatchRow {
                date: compose(2018, 8, 24),
                home_team: "Bayern Munich".into(),
                guest_team: "Hoffenheim".into(),
                home_goals: 3,
                guest_goals: 1,
            },
            rows[0]
        );
        assert_eq!(compose(2018, 9, 1), rows[3].date);
    }

    #[test]
    fn columns_located_by_header() {
        let csv = "Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG\nE0,09/08/2019,20:00,Liverpool,Norwich,4,1\n";
        let rows = read_matches(csv.as_bytes()).unwrap();
        assert_eq!(compose(2019, 8, 9), rows[0].date);
        assert_eq!("Liverpool", rows[0].home_team);
        assert_eq!("Norwich", rows[0].guest_team);
        assert_eq!((4, 1), (rows[0].home_goals, rows[0].guest_goals));

        let csv = "Date,Home,Away,HG,AG\n12/03/95,Ajax,PSV,2,2\n";
        let rows = read_matches(csv.as_bytes()).unwrap();
        assert_eq!(compose(1995, 3, 12), rows[0].date);
        assert_eq!("PSV", rows[0].guest_team);
    }

    #[test]
    fn empty_input() {
        assert!(read_matches("".as_bytes()).unwrap().is_empty());
        assert!(read_matches("Div,Date,HomeTeam,AwayTeam,FTHG,FTAG\n".as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_rows() {
        let err = read_matches("h\nD1,32/01/18,A,B,1,0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { line: 2, ref value } if value == "32/01/18"));

        let err = read_matches("h\nD1,01/01/18,A,B,1,0\nD1,02/01/18,A,B,x,0\n".as_bytes()).unwrap_err();
        assert_eq!("line 3: invalid goal count 'x'", err.to_string());

        let err = read_matches("h\nD1,01/01/18,A,B,-1,0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidGoals { line: 2, .. }));

        let err = read_matches("h\nD1,01/01/18,A\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                line: 2,
                field: "AwayTeam"
            }
        ));
    }

    #[test]
    fn load_into_estimator() {
        let mut estimator = MatchEstimator::new();
        assert_eq!(4, load_matches_from(&mut estimator, BUNDESLIGA.as_bytes()).unwrap());
        assert_eq!(4, estimator.match_count());
        assert_eq!(7, estimator.team_count());
        assert!(!estimator.is_stale());
        assert!(estimator.has_home_statistics("Hannover"));
        assert!(estimator.has_guest_statistics("Hannover"));
        assert!(estimator.estimate("Bremen", "Dortmund").is_ok());
    }

    #[test]
    fn load_is_all_or_nothing() {
        let mut estimator = MatchEstimator::new();
        let csv = format!("{BUNDESLIGA}D1,02/09/18,Bremen,Dortmund,one,0\n");
        assert!(load_matches_from(&mut estimator, csv.as_bytes()).is_err());
        assert_eq!(0, estimator.match_count());
        assert_eq!(0, estimator.team_count());
    }

    #[test]
    fn load_missing_file() {
        let mut estimator = MatchEstimator::new();
        assert!(matches!(
            load_matches(&mut estimator, "no/such/file.csv"),
            Err(LoadError::Io(_))
        ));
    }
}
