//! Line-oriented reading of unquoted CSV files.

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

pub struct CsvReader<R> {
    lines: Lines<R>,
}
impl CsvReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}
impl<R: BufRead> CsvReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Reads the next line as a record of fields. A trailing carriage return is dropped.
    pub fn read(&mut self) -> Option<Result<Vec<String>, io::Error>> {
        self.lines.next().map(|line| {
            line.map(|line| {
                line.trim_end_matches('\r')
                    .split(',')
                    .map(ToString::to_string)
                    .collect()
            })
        })
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_records() {
        let mut reader = CsvReader::from_reader("Div,Date\r\nD1,01/08/18\n\nE0,x,\n".as_bytes());
        assert_eq!(vec!["Div", "Date"], reader.read().unwrap().unwrap());
        assert_eq!(vec!["D1", "01/08/18"], reader.read().unwrap().unwrap());
        assert_eq!(vec![""], reader.read().unwrap().unwrap());
        assert_eq!(vec!["E0", "x", ""], reader.read().unwrap().unwrap());
        assert!(reader.read().is_none());
    }

    #[test]
    fn open_missing_file() {
        assert!(CsvReader::open("no/such/file.csv").is_err());
    }
}
