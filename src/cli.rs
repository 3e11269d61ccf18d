//! Terminal helpers: turning typed names into ids and printing a path.
//!
//! Both work over generic readers and writers so the binary can pass
//! stdin/stdout and tests can pass byte buffers.

use std::io::{self, BufRead, Write};

use serde_json::json;

use crate::catalogue::{Catalogue, PersonId};
use crate::error::{DegreesError, Result};
use crate::search::SearchOutcome;

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|source| DegreesError::Io {
            path: "<stdin>".into(),
            source,
        })?;
    Ok(line.trim().to_string())
}

fn io_err(source: io::Error) -> DegreesError {
    DegreesError::Io {
        path: "<stdout>".into(),
        source,
    }
}

/// Prints `prompt` and reads a name from `input`.
pub fn prompt_name(
    prompt: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<String> {
    write!(out, "{}", prompt).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    read_line(input)
}

/// Resolves a name to one person id. When several people share the name,
/// lists them and asks for an id; a choice outside that list counts as not
/// found.
pub fn resolve_person(
    catalogue: &Catalogue,
    name: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<PersonId> {
    let ids = catalogue.person_ids_for_name(name);
    match ids.as_slice() {
        [] => Err(DegreesError::PersonNotFound(name.to_string())),
        [id] => Ok(id.clone()),
        _ => {
            writeln!(out, "Which '{}'?", name).map_err(io_err)?;
            for id in &ids {
                if let Some(person) = catalogue.person(id) {
                    let birth = person.birth.map(|b| b.to_string()).unwrap_or_default();
                    writeln!(
                        out,
                        "ID: {}, Name: {}, Birth: {}",
                        id, person.name, birth
                    )
                    .map_err(io_err)?;
                }
            }
            let chosen = prompt_name("Intended Person ID: ", input, out)?;
            ids.into_iter()
                .find(|id| id.as_str() == chosen)
                .ok_or_else(|| DegreesError::PersonNotFound(name.to_string()))
        }
    }
}

fn person_name<'a>(catalogue: &'a Catalogue, id: &'a PersonId) -> &'a str {
    catalogue.person(id).map_or(id.as_str(), |p| p.name.as_str())
}

/// Writes the numbered "A and B starred in M" trace, or `Not connected.`
pub fn write_path(
    catalogue: &Catalogue,
    source: &PersonId,
    outcome: &SearchOutcome,
    out: &mut impl Write,
) -> Result<()> {
    let SearchOutcome::Found(steps) = outcome else {
        return writeln!(out, "Not connected.").map_err(io_err);
    };

    writeln!(out, "{} degrees of separation.", steps.len()).map_err(io_err)?;
    let mut previous = source;
    for (i, step) in steps.iter().enumerate() {
        let title = catalogue
            .movie(&step.movie)
            .map_or(step.movie.as_str(), |m| m.title.as_str());
        writeln!(
            out,
            "{}: {} and {} starred in {}",
            i + 1,
            person_name(catalogue, previous),
            person_name(catalogue, &step.person),
            title
        )
        .map_err(io_err)?;
        previous = &step.person;
    }
    Ok(())
}

/// Writes the outcome as one JSON object.
pub fn write_json(
    source: &PersonId,
    target: &PersonId,
    outcome: &SearchOutcome,
    out: &mut impl Write,
) -> Result<()> {
    let value = match outcome {
        SearchOutcome::Found(steps) => json!({
            "source": source,
            "target": target,
            "degrees": steps.len(),
            "path": steps,
        }),
        SearchOutcome::NotConnected => json!({
            "source": source,
            "target": target,
            "degrees": null,
            "path": null,
        }),
    };
    writeln!(out, "{}", value).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::MovieId;
    use crate::search::Step;
    use pretty_assertions::assert_eq;

    fn catalogue() -> Catalogue {
        let mut builder = Catalogue::builder();
        builder.add_person("1".into(), "Chris Evans", Some(1981));
        builder.add_person("2".into(), "Chris Evans", Some(1966));
        builder.add_person("3".into(), "Scarlett Johansson", Some(1984));
        builder.add_movie("10".into(), "The Avengers", Some(2012));
        builder.add_star(&"1".into(), &"10".into());
        builder.add_star(&"3".into(), &"10".into());
        builder.build()
    }

    fn avengers_step() -> SearchOutcome {
        SearchOutcome::Found(vec![Step {
            movie: MovieId::from("10"),
            person: PersonId::from("3"),
        }])
    }

    #[test]
    fn test_resolve_unique_name() {
        let mut out: Vec<u8> = Vec::new();
        let mut input = "".as_bytes();
        let id = resolve_person(&catalogue(), "scarlett johansson", &mut input, &mut out).unwrap();
        assert_eq!(id, PersonId::from("3"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let mut out: Vec<u8> = Vec::new();
        let mut input = "".as_bytes();
        let err = resolve_person(&catalogue(), "Nobody", &mut input, &mut out).unwrap_err();
        assert!(matches!(err, DegreesError::PersonNotFound(name) if name == "Nobody"));
    }

    #[test]
    fn test_resolve_ambiguous_name() {
        let mut out: Vec<u8> = Vec::new();
        let mut input = "2\n".as_bytes();
        let id = resolve_person(&catalogue(), "Chris Evans", &mut input, &mut out).unwrap();
        assert_eq!(id, PersonId::from("2"));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Which 'Chris Evans'?\n"));
        assert!(printed.contains("ID: 1, Name: Chris Evans, Birth: 1981\n"));
        assert!(printed.contains("ID: 2, Name: Chris Evans, Birth: 1966\n"));
    }

    #[test]
    fn test_resolve_ambiguous_bad_choice_is_not_found() {
        let mut out: Vec<u8> = Vec::new();
        let mut input = "7\n".as_bytes();
        let err = resolve_person(&catalogue(), "Chris Evans", &mut input, &mut out).unwrap_err();
        assert!(matches!(&err, DegreesError::PersonNotFound(name) if name == "Chris Evans"));
        assert_eq!(err.to_string(), "person not found: Chris Evans");
    }

    #[test]
    fn test_write_path() {
        let mut out: Vec<u8> = Vec::new();
        write_path(&catalogue(), &"1".into(), &avengers_step(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1 degrees of separation.\n\
             1: Chris Evans and Scarlett Johansson starred in The Avengers\n"
        );
    }

    #[test]
    fn test_write_not_connected() {
        let mut out: Vec<u8> = Vec::new();
        let outcome = SearchOutcome::NotConnected;
        write_path(&catalogue(), &"1".into(), &outcome, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Not connected.\n");
    }

    #[test]
    fn test_write_json() {
        let mut out: Vec<u8> = Vec::new();
        write_json(&"1".into(), &"3".into(), &avengers_step(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["degrees"], 1);
        assert_eq!(value["path"][0]["movie"], "10");
        assert_eq!(value["path"][0]["person"], "3");
    }

    #[test]
    fn test_write_json_not_connected() {
        let mut out: Vec<u8> = Vec::new();
        let outcome = SearchOutcome::NotConnected;
        write_json(&"1".into(), &"2".into(), &outcome, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["source"], "1");
        assert_eq!(value["target"], "2");
        assert!(value["degrees"].is_null());
        assert!(value["path"].is_null());
    }
}
