//! The in-memory person/movie catalogue and its co-star adjacency.
//!
//! A [`Catalogue`] is built once through [`CatalogueBuilder`] and is read-only
//! afterwards. Searches hold a shared reference to it, so any number of them
//! may run on different threads at the same time.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DegreesError, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque person key, e.g. `"102"` in the IMDB-derived data.
    PersonId
);
string_id!(
    /// Opaque movie key.
    MovieId
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birth: Option<u16>,
    pub movies: BTreeSet<MovieId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    pub stars: BTreeSet<PersonId>,
}

/// Read-only view of people, movies and who starred in what.
#[derive(Debug, Default)]
pub struct Catalogue {
    people: HashMap<PersonId, Person>,
    movies: HashMap<MovieId, Movie>,
    names: HashMap<String, BTreeSet<PersonId>>, // lower-cased name -> ids
}

impl Catalogue {
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    /// Like [`Catalogue::person`], but an unknown id is an error.
    pub fn require_person(&self, id: &PersonId) -> Result<&Person> {
        self.people
            .get(id)
            .ok_or_else(|| DegreesError::UnknownPerson(id.clone()))
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Every `(movie, co-star)` pair for `person_id`, never including the
    /// person themselves.
    ///
    /// An unknown id yields an empty list. Pairs come out ordered by movie id
    /// and then by co-star id, so the order is the same on every call.
    pub fn neighbors(&self, person_id: &PersonId) -> Vec<(MovieId, PersonId)> {
        let Some(person) = self.people.get(person_id) else {
            return Vec::new();
        };

        let mut pairs = Vec::new();
        for movie_id in &person.movies {
            if let Some(movie) = self.movies.get(movie_id) {
                for star in &movie.stars {
                    if star != person_id {
                        pairs.push((movie_id.clone(), star.clone()));
                    }
                }
            }
        }
        pairs
    }

    /// All ids whose name matches `name`, ignoring case.
    pub fn person_ids_for_name(&self, name: &str) -> Vec<PersonId> {
        self.names
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Mutable staging area used while loading. [`CatalogueBuilder::build`] hands
/// back the frozen [`Catalogue`].
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    inner: Catalogue,
}

impl CatalogueBuilder {
    /// Inserts a person. A later insert with the same id replaces the
    /// earlier one, including its name, but keeps any movies already linked.
    pub fn add_person(
        &mut self,
        id: PersonId,
        name: impl Into<String>,
        birth: Option<u16>,
    ) -> &mut Self {
        let name = name.into();
        let movies = match self.inner.people.remove(&id) {
            Some(old) => {
                self.unindex_name(&old.name, &id);
                old.movies
            }
            None => BTreeSet::new(),
        };
        self.inner
            .names
            .entry(name.to_lowercase())
            .or_default()
            .insert(id.clone());

        let person = Person {
            id: id.clone(),
            name,
            birth,
            movies,
        };
        self.inner.people.insert(id, person);
        self
    }

    fn unindex_name(&mut self, name: &str, id: &PersonId) {
        let key = name.to_lowercase();
        if let Some(ids) = self.inner.names.get_mut(&key) {
            ids.remove(id);
            if ids.is_empty() {
                self.inner.names.remove(&key);
            }
        }
    }

    pub fn add_movie(
        &mut self,
        id: MovieId,
        title: impl Into<String>,
        year: Option<u16>,
    ) -> &mut Self {
        let stars = self
            .inner
            .movies
            .remove(&id)
            .map(|old| old.stars)
            .unwrap_or_default();
        let movie = Movie {
            id: id.clone(),
            title: title.into(),
            year,
            stars,
        };
        self.inner.movies.insert(id, movie);
        self
    }

    /// Links a person to a movie in both directions. Returns `false` and
    /// changes nothing when either side is unknown.
    pub fn add_star(&mut self, person_id: &PersonId, movie_id: &MovieId) -> bool {
        if !self.inner.people.contains_key(person_id)
            || !self.inner.movies.contains_key(movie_id)
        {
            return false;
        }
        if let Some(person) = self.inner.people.get_mut(person_id) {
            person.movies.insert(movie_id.clone());
        }
        if let Some(movie) = self.inner.movies.get_mut(movie_id) {
            movie.stars.insert(person_id.clone());
        }
        true
    }

    pub fn build(self) -> Catalogue {
        self.inner
    }
}
