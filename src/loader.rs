//! Loads a [`Catalogue`] from a directory of CSV files.
//!
//! The directory holds `people.csv` (`id,name,birth`), `movies.csv`
//! (`id,title,year`) and `stars.csv` (`person_id,movie_id`), each with a
//! header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::catalogue::{Catalogue, MovieId, PersonId};
use crate::error::{DegreesError, Result};

#[derive(Debug, Deserialize)]
struct PersonRow {
    id: String,
    name: String,
    #[serde(default)]
    birth: String,
}

#[derive(Debug, Deserialize)]
struct MovieRow {
    id: String,
    title: String,
    #[serde(default)]
    year: String,
}

#[derive(Debug, Deserialize)]
struct StarRow {
    person_id: String,
    movie_id: String,
}

/// Blank or non-numeric years are treated as unknown.
fn parse_year(field: &str) -> Option<u16> {
    field.trim().parse().ok()
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn open(dir: &Path, file_name: &str) -> Result<File> {
    let path = dir.join(file_name);
    File::open(&path).map_err(|source| DegreesError::Io { path, source })
}

pub fn load_directory(dir: impl AsRef<Path>) -> Result<Catalogue> {
    let dir = dir.as_ref();
    debug!(directory = %dir.display(), "loading catalogue");
    load_from_readers(
        open(dir, "people.csv")?,
        open(dir, "movies.csv")?,
        open(dir, "stars.csv")?,
    )
}

/// Same as [`load_directory`] over arbitrary readers.
pub fn load_from_readers<P: Read, M: Read, S: Read>(
    people: P,
    movies: M,
    stars: S,
) -> Result<Catalogue> {
    let mut builder = Catalogue::builder();

    for row in csv_reader(people).deserialize() {
        let row: PersonRow = row?;
        let birth = parse_year(&row.birth);
        builder.add_person(PersonId::new(row.id), row.name, birth);
    }

    for row in csv_reader(movies).deserialize() {
        let row: MovieRow = row?;
        let year = parse_year(&row.year);
        builder.add_movie(MovieId::new(row.id), row.title, year);
    }

    let mut skipped = 0usize;
    for row in csv_reader(stars).deserialize() {
        let row: StarRow = row?;
        let person_id = PersonId::new(row.person_id);
        let movie_id = MovieId::new(row.movie_id);
        if !builder.add_star(&person_id, &movie_id) {
            skipped += 1; // star row points at a person or movie we never saw
        }
    }
    if skipped > 0 {
        debug!(skipped, "ignored star rows with unknown ids");
    }

    let catalogue = builder.build();
    info!(
        people = catalogue.person_count(),
        movies = catalogue.movie_count(),
        "catalogue loaded"
    );
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PEOPLE: &str = "id,name,birth\n\
                          102,Kevin Bacon,1958\n\
                          129,Tom Cruise,1962\n\
                          144,Cary Elwes,\n";
    const MOVIES: &str = "id,title,year\n\
                          104257,A Few Good Men,1992\n\
                          93779,The Princess Bride,1987\n";
    const STARS: &str = "person_id,movie_id\n102,104257\n129,104257\n144,93779\n999,93779\n";

    #[test]
    fn test_load_from_readers() {
        let catalogue =
            load_from_readers(PEOPLE.as_bytes(), MOVIES.as_bytes(), STARS.as_bytes()).unwrap();
        assert_eq!(catalogue.person_count(), 3);
        assert_eq!(catalogue.movie_count(), 2);

        let bacon = catalogue.person(&"102".into()).unwrap();
        assert_eq!(bacon.name, "Kevin Bacon");
        assert_eq!(bacon.birth, Some(1958));

        let elwes = catalogue.person(&"144".into()).unwrap();
        assert_eq!(elwes.birth, None); // blank birth field

        let bride = catalogue.movie(&"93779".into()).unwrap();
        assert_eq!(bride.stars.len(), 1); // row for unknown person 999 skipped
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1987"), Some(1987));
        assert_eq!(parse_year(" 1987 "), Some(1987));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("n/a"), None);
    }

    #[test]
    fn test_quoted_titles_with_commas() {
        let movies = "id,title,year\n1,\"Crouching Tiger, Hidden Dragon\",2000\n";
        let stars = "person_id,movie_id\n";
        let catalogue =
            load_from_readers(PEOPLE.as_bytes(), movies.as_bytes(), stars.as_bytes()).unwrap();
        let movie = catalogue.movie(&"1".into()).unwrap();
        assert_eq!(movie.title, "Crouching Tiger, Hidden Dragon");
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let bad = "id,year\n1,1995\n"; // no title column
        let result = load_from_readers(PEOPLE.as_bytes(), bad.as_bytes(), STARS.as_bytes());
        assert!(matches!(result, Err(DegreesError::Csv(_))));
    }

    #[test]
    fn test_load_directory_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_directory(dir.path());
        match result {
            Err(DegreesError::Io { path, .. }) => assert!(path.ends_with("people.csv")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("people.csv"), PEOPLE).unwrap();
        std::fs::write(dir.path().join("movies.csv"), MOVIES).unwrap();
        std::fs::write(dir.path().join("stars.csv"), STARS).unwrap();

        let catalogue = load_directory(dir.path()).unwrap();
        assert_eq!(
            catalogue.neighbors(&"102".into()),
            vec![(MovieId::from("104257"), PersonId::from("129"))]
        );
    }
}
