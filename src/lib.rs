//! Degrees of separation between people in a cast/crew graph.
//!
//! Load a [`Catalogue`] with [`loader::load_directory`], then ask
//! [`shortest_path`] for the fewest shared-movie steps between two people.

pub mod catalogue;
pub mod cli;
pub mod error;
pub mod frontier;
pub mod loader;
pub mod node;
pub mod search;

pub use catalogue::{Catalogue, Movie, MovieId, Person, PersonId};
pub use error::{DegreesError, Result};
pub use search::{shortest_path, PathSearch, SearchLimits, SearchOutcome, Step};
