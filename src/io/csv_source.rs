//! Reading the movie and crew tables from CSV.
//!
//! Rows come back raw: every cell is an optional string, so a bad value in
//! one row never aborts the load. Short or long records are read leniently,
//! and a record the reader cannot decode at all comes back as a placeholder
//! row carrying the error. Parsing and validation happen in
//! [`crate::store::RecordStore::build`], which records why each dropped row
//! was dropped. Only I/O failures and an unreadable header end the read.

use crate::errors::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const MARKET_PREFIX: &str = "released_in_";

/// One line of the movie table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMovieRow {
    #[serde(skip)]
    pub line: u64,
    #[serde(default)]
    pub tconst: Option<String>,
    #[serde(default, rename = "primaryTitle")]
    pub title: Option<String>,
    #[serde(default, rename = "startYear")]
    pub year: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, rename = "averageRating")]
    pub rating: Option<String>,
    #[serde(default, rename = "numVotes")]
    pub votes: Option<String>,
    #[serde(default, rename = "runtimeMinutes")]
    pub runtime: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub macro_region: Option<String>,
    #[serde(default)]
    pub distribution_count: Option<String>,
    /// Markets whose `released_in_<code>` cell is truthy
    #[serde(skip)]
    pub markets: BTreeSet<String>,
    /// Set when the record could not be decoded
    #[serde(skip)]
    pub malformed: Option<String>,
}

/// One line of the crew profile table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCrewRow {
    #[serde(skip)]
    pub line: u64,
    #[serde(default, rename = "primaryName")]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub decade: Option<String>,
    #[serde(default)]
    pub mean_rating: Option<String>,
    #[serde(default)]
    pub total_votes: Option<String>,
    #[serde(default)]
    pub total_movies: Option<String>,
    #[serde(default)]
    pub top_movie_title: Option<String>,
    #[serde(default)]
    pub top_movie_year: Option<String>,
    #[serde(default)]
    pub top_movie_rating: Option<String>,
    #[serde(skip)]
    pub malformed: Option<String>,
}

/// Whether a market flag cell means "released".
pub fn is_truthy(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "1.0" | "yes" | "y"
    )
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::source_unavailable(path, source))
}

/// Read the movie table at `path`.
pub fn read_movies(path: &Path) -> Result<Vec<RawMovieRow>> {
    let rows = read_movies_from(open(path)?).map_err(|e| match e {
        Error::Csv { source, .. } => Error::csv(path, source),
        other => other,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "read movie table");
    Ok(rows)
}

/// Read the crew table at `path`.
pub fn read_crew(path: &Path) -> Result<Vec<RawCrewRow>> {
    let rows = read_crew_from(open(path)?).map_err(|e| match e {
        Error::Csv { source, .. } => Error::csv(path, source),
        other => other,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "read crew table");
    Ok(rows)
}

/// Read movie rows from any reader. Columns named `released_in_<code>`
/// become market codes.
pub fn read_movies_from<R: Read>(reader: R) -> Result<Vec<RawMovieRow>> {
    let mut csv = lenient_reader(reader);
    let headers = csv.headers().map_err(in_memory)?.clone();

    let market_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            name.strip_prefix(MARKET_PREFIX)
                .filter(|code| !code.is_empty())
                .map(|code| (index, code.to_lowercase()))
        })
        .collect();

    let mut rows = Vec::new();
    for record in csv.records() {
        let row = match decode::<RawMovieRow>(record, &headers)? {
            Decoded::Row(record, mut row) => {
                row.line = line_of(&record);
                row.markets = market_columns
                    .iter()
                    .filter(|(index, _)| record.get(*index).is_some_and(is_truthy))
                    .map(|(_, code)| code.clone())
                    .collect();
                row
            }
            Decoded::Malformed { line, message } => RawMovieRow {
                line,
                malformed: Some(message),
                ..RawMovieRow::default()
            },
        };
        rows.push(row);
    }
    Ok(rows)
}

/// Read crew rows from any reader.
pub fn read_crew_from<R: Read>(reader: R) -> Result<Vec<RawCrewRow>> {
    let mut csv = lenient_reader(reader);
    let headers = csv.headers().map_err(in_memory)?.clone();

    let mut rows = Vec::new();
    for record in csv.records() {
        let row = match decode::<RawCrewRow>(record, &headers)? {
            Decoded::Row(record, mut row) => {
                row.line = line_of(&record);
                row
            }
            Decoded::Malformed { line, message } => RawCrewRow {
                line,
                malformed: Some(message),
                ..RawCrewRow::default()
            },
        };
        rows.push(row);
    }
    Ok(rows)
}

fn lenient_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

enum Decoded<T> {
    Row(csv::StringRecord, T),
    Malformed { line: u64, message: String },
}

fn decode<T: DeserializeOwned>(
    record: std::result::Result<csv::StringRecord, csv::Error>,
    headers: &csv::StringRecord,
) -> Result<Decoded<T>> {
    let record = match record {
        Ok(record) => record,
        Err(err) if err.is_io_error() => return Err(in_memory(err)),
        Err(err) => {
            let line = err.position().map_or(0, |p| p.line());
            warn!(line, error = %err, "skipping malformed record");
            return Ok(Decoded::Malformed {
                line,
                message: err.to_string(),
            });
        }
    };
    match record.deserialize(Some(headers)) {
        Ok(row) => Ok(Decoded::Row(record, row)),
        Err(err) => {
            let line = line_of(&record);
            warn!(line, error = %err, "skipping malformed record");
            Ok(Decoded::Malformed {
                line,
                message: err.to_string(),
            })
        }
    }
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn in_memory(source: csv::Error) -> Error {
    Error::csv("<input>", source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reads_movie_columns_and_markets() {
        let data = indoc! {"
            tconst,primaryTitle,startYear,genre,averageRating,numVotes,runtimeMinutes,distribution_count,released_in_br,released_in_us
            tt1,A,1995,Drama,8.0,1200,101,12,True,False
            tt2,B,,,7.1,,,,0,1
        "};

        let rows = read_movies_from(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title.as_deref(), Some("A"));
        assert_eq!(rows[0].year.as_deref(), Some("1995"));
        assert_eq!(rows[0].markets, BTreeSet::from(["br".to_string()]));
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].year, None);
        assert_eq!(rows[1].genre, None);
        assert_eq!(rows[1].markets, BTreeSet::from(["us".to_string()]));
    }

    #[test]
    fn test_missing_optional_columns_default_to_none() {
        let data = indoc! {"
            tconst,primaryTitle,startYear,genre,averageRating
            tt1,A,1995,Drama,8.0
        "};

        let rows = read_movies_from(data.as_bytes()).unwrap();

        assert_eq!(rows[0].runtime, None);
        assert_eq!(rows[0].region, None);
        assert!(rows[0].markets.is_empty());
    }

    #[test]
    fn test_reads_crew_rows() {
        let data = indoc! {"
            primaryName,category,decade,mean_rating,total_votes,total_movies,top_movie_title,top_movie_year,top_movie_rating
            Jane Doe,actress,1990,7.4,25000,3,A,1995,8.0
        "};

        let rows = read_crew_from(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Jane Doe"));
        assert_eq!(rows[0].top_movie_year.as_deref(), Some("1995"));
    }

    #[test]
    fn test_short_row_does_not_abort_the_table() {
        let data = indoc! {"
            tconst,primaryTitle,startYear,genre,averageRating,numVotes,runtimeMinutes
            tt1,A,1995,Drama,8.0,1200,120
            tt2,B,1996,Drama
            tt3,C,1997,Comedy,6.5,300,90
        "};

        let rows = read_movies_from(data.as_bytes()).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.tconst.as_deref()).collect();
        assert_eq!(ids, vec![Some("tt1"), Some("tt2"), Some("tt3")]);
        assert_eq!(rows[1].rating, None);
        assert_eq!(rows[1].malformed, None);
        assert_eq!(rows[2].runtime.as_deref(), Some("90"));
    }

    #[test]
    fn test_long_row_ignores_extra_cells() {
        let data = "tconst,primaryTitle\ntt1,A,extra\n";
        let rows = read_movies_from(data.as_bytes()).unwrap();
        assert_eq!(rows[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_undecodable_record_becomes_malformed_row() {
        let mut data = b"primaryName,category,decade\nAna,director,1990\n".to_vec();
        data.extend_from_slice(b"Bo\xff\xfe,actor,2000\n");
        data.extend_from_slice(b"Cid,actress,2010\n");

        let rows = read_crew_from(data.as_slice()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name.as_deref(), Some("Ana"));
        assert!(rows[1].malformed.is_some());
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[2].name.as_deref(), Some("Cid"));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = read_movies(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_truthy_cells() {
        for cell in ["true", "True", "1", "yes", " TRUE "] {
            assert!(is_truthy(cell), "{cell}");
        }
        for cell in ["false", "0", "", "no"] {
            assert!(!is_truthy(cell), "{cell}");
        }
    }
}
