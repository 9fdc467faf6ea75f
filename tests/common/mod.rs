// Shared fixtures for cinemap integration tests
#![allow(dead_code)]

use cinemap::genres::GenreNormalizer;
use cinemap::io::csv_source::{read_crew_from, read_movies_from};
use cinemap::store::{LoadOutcome, RecordStore};
use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};

/// Six titles across four decades. `tt001` has two genre rows, `tt004` has
/// no runtime, and two rows are broken on purpose (no title, no genre).
pub const MOVIES_CSV: &str = indoc! {"
    tconst,primaryTitle,startYear,genre,averageRating,numVotes,runtimeMinutes,region,macro_region,distribution_count,released_in_us,released_in_br
    tt001,Alpha,1972,Drama,7.5,12000,95,US,North America,25,True,True
    tt001,Alpha,1972,Crime,7.5,12000,95,US,North America,25,True,True
    tt002,Beta,1995,Horror,6.1,3400,88,GB,Europe,4,True,False
    tt003,Gamma,1995,Drama,8.2,56000,152,BR,South America,1,False,True
    tt004,Delta,2004,Action,5.9,800,,US,North America,12,True,False
    tt005,Epsilon,2011,Comedy,6.8,2200,101,FR,Europe,3,False,False
    tt006,Zeta,2012,Sci-Fi,7.9,90000,130,US,North America,40,True,True
    tt007,,2013,Drama,7.0,100,90,US,North America,2,True,False
    tt008,Theta,2014,,6.0,100,90,US,North America,2,True,False
"};

/// Crew profiles keyed to the movies above; the writer row is dropped.
pub const CREW_CSV: &str = indoc! {"
    primaryName,category,decade,mean_rating,total_votes,total_movies,top_movie_title,top_movie_year,top_movie_rating
    Ana Lima,director,1990,8.2,56000,3,Gamma,1995,8.2
    Bruno Reis,director,1990,6.1,3400,2,Beta,1995,6.1
    Carla Dias,actress,1990,7.0,900,1,Beta,1995,6.1
    Davi Luz,actor,2010,7.9,90000,4,Zeta,2012,7.9
    Eva Rocha,actress,2010,6.8,2200,2,Epsilon,2011,6.8
    Fabio Melo,writer,2010,7.0,100,1,Zeta,2012,7.9
"};

/// Movie rows that survive loading.
pub const LOADED_MOVIE_ROWS: usize = 7;
/// Rows dropped from both tables.
pub const DROPPED_ROWS: usize = 3;

/// Build the fixture store in memory.
pub fn fixture_outcome() -> LoadOutcome {
    let movies = read_movies_from(MOVIES_CSV.as_bytes()).expect("movies fixture parses");
    let crew = read_crew_from(CREW_CSV.as_bytes()).expect("crew fixture parses");
    RecordStore::build(movies, crew, &GenreNormalizer::default())
}

pub fn fixture_store() -> RecordStore {
    fixture_outcome().store
}

/// Paths of the fixture tables written into `dir`.
pub struct FixtureFiles {
    pub movies: PathBuf,
    pub crew: PathBuf,
}

pub fn write_fixture(dir: &Path) -> FixtureFiles {
    let movies = dir.join("imdb_movies_final.csv");
    let crew = dir.join("imdb_crew_profiles.csv");
    fs::write(&movies, MOVIES_CSV).expect("write movies fixture");
    fs::write(&crew, CREW_CSV).expect("write crew fixture");
    FixtureFiles { movies, crew }
}
