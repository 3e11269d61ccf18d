//! Breadth-first shortest-path search over the co-star graph.
//!
//! [`PathSearch`] is a small state machine (`Initialized -> Running ->
//! Found | Exhausted`) that callers can drive one dequeue at a time with
//! [`PathSearch::step`], or run to completion with [`PathSearch::run`] or
//! [`PathSearch::run_with`]. Every person is marked explored the moment their
//! node is created, so each person gets at most one node and the first node
//! made for the target lies on a shortest path.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error, trace};

use crate::catalogue::{Catalogue, MovieId, PersonId};
use crate::error::{DegreesError, Result};
use crate::frontier::{Frontier, QueueFrontier, StackFrontier};
use crate::node::{NodeArena, NodeIndex, SearchNode};

/// One edge of a path: arrived at `person` via `movie`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    pub movie: MovieId,
    pub person: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Steps from source to target. Empty when they are the same person.
    Found(Vec<Step>),
    NotConnected,
}

impl SearchOutcome {
    /// Degrees of separation, or `None` when not connected.
    pub fn degrees(&self) -> Option<usize> {
        match self {
            SearchOutcome::Found(steps) => Some(steps.len()),
            SearchOutcome::NotConnected => None,
        }
    }

    pub fn into_steps(self) -> Option<Vec<Step>> {
        match self {
            SearchOutcome::Found(steps) => Some(steps),
            SearchOutcome::NotConnected => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initialized,
    Running,
    /// Holds the node that reached the target.
    Found(NodeIndex),
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Found(_) | SearchState::Exhausted)
    }
}

/// Bounds applied once per dequeue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_explored: Option<usize>,
}

/// Snapshot handed to cancellation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    pub explored: usize,
    pub frontier: usize,
    pub expanded: usize,
}

pub struct PathSearch<'a> {
    catalogue: &'a Catalogue,
    source: PersonId,
    target: PersonId,
    limits: SearchLimits,
    arena: NodeArena,
    frontier: QueueFrontier,
    explored: HashSet<PersonId>,
    expanded: usize,
    state: SearchState,
}

impl<'a> PathSearch<'a> {
    /// Fails with [`DegreesError::UnknownPerson`] if either id is not in
    /// the catalogue.
    pub fn new(
        catalogue: &'a Catalogue,
        source: &PersonId,
        target: &PersonId,
    ) -> Result<Self> {
        catalogue.require_person(source)?;
        catalogue.require_person(target)?;
        Ok(Self {
            catalogue,
            source: source.clone(),
            target: target.clone(),
            limits: SearchLimits::default(),
            arena: NodeArena::new(),
            frontier: QueueFrontier::new(),
            explored: HashSet::new(),
            expanded: 0,
            state: SearchState::Initialized,
        })
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn progress(&self) -> SearchProgress {
        SearchProgress {
            explored: self.explored.len(),
            frontier: self.frontier.len(),
            expanded: self.expanded,
        }
    }

    /// Advances the search by one transition: seeding from `Initialized`,
    /// or one dequeue-and-expand while `Running`. Terminal states are
    /// returned unchanged.
    pub fn step(&mut self) -> Result<SearchState> {
        match self.state {
            SearchState::Initialized => self.seed(),
            SearchState::Running => self.expand_next()?,
            SearchState::Found(_) | SearchState::Exhausted => {}
        }
        Ok(self.state)
    }

    fn seed(&mut self) {
        debug!(source = %self.source, target = %self.target, "starting search");
        let root = self.arena.push(SearchNode::root(self.source.clone()));
        self.explored.insert(self.source.clone());

        if self.source == self.target {
            self.state = SearchState::Found(root);
            return;
        }
        self.frontier.add(root, self.source.clone());
        self.state = SearchState::Running;
    }

    fn expand_next(&mut self) -> Result<()> {
        if self.frontier.is_empty() {
            debug!(
                explored = self.explored.len(),
                "frontier exhausted, not connected"
            );
            self.state = SearchState::Exhausted;
            return Ok(());
        }
        if let Some(limit) = self.limits.max_explored {
            if self.explored.len() > limit {
                return Err(DegreesError::LimitExceeded { limit });
            }
        }

        let current = self.frontier.remove_next()?;
        let person = match self.arena.get(current) {
            Some(node) => node.person.clone(),
            None => {
                return Err(DegreesError::MalformedChain {
                    node: current.index(),
                })
            }
        };
        self.expanded += 1;
        trace!(person = %person, "expanding");

        for (movie, neighbor) in self.catalogue.neighbors(&person) {
            if !self.explored.insert(neighbor.clone()) {
                continue;
            }
            let found = neighbor == self.target;
            let index = self.arena.push(SearchNode {
                person: neighbor.clone(),
                via: Some(movie),
                parent: Some(current),
            });
            if found {
                self.state = SearchState::Found(index);
                return Ok(());
            }
            self.frontier.add(index, neighbor);
        }
        Ok(())
    }

    pub fn run(self) -> Result<SearchOutcome> {
        self.run_with(|_| false)
    }

    /// Runs to completion, calling `cancel` once before every dequeue. A
    /// `true` from `cancel` stops the search with
    /// [`DegreesError::Cancelled`]. Seeding and the final step that finds the
    /// frontier empty dequeue nothing, so `cancel` is not called for them.
    pub fn run_with(
        mut self,
        mut cancel: impl FnMut(&SearchProgress) -> bool,
    ) -> Result<SearchOutcome> {
        while !self.state.is_terminal() {
            let dequeues = self.state == SearchState::Running && !self.frontier.is_empty();
            if dequeues && cancel(&self.progress()) {
                return Err(DegreesError::Cancelled {
                    explored: self.explored.len(),
                });
            }
            self.step()?;
        }
        self.outcome()
    }

    /// The result of a finished search. Returns `None` while still running.
    pub fn finish(&self) -> Option<Result<SearchOutcome>> {
        self.state.is_terminal().then(|| self.outcome())
    }

    fn outcome(&self) -> Result<SearchOutcome> {
        match self.state {
            SearchState::Found(terminal) => {
                let steps = reconstruct(&self.arena, Some(terminal))?;
                debug!(
                    degrees = steps.len(),
                    explored = self.explored.len(),
                    "path found"
                );
                Ok(SearchOutcome::Found(steps))
            }
            _ => Ok(SearchOutcome::NotConnected),
        }
    }
}

/// Walks parent links from `terminal` back to the root and returns the
/// steps in source-to-target order. `None` means source and target were the
/// same person.
pub fn reconstruct(arena: &NodeArena, terminal: Option<NodeIndex>) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let Some(mut current) = terminal else {
        return Ok(steps);
    };

    while let Some(node) = arena.get(current) {
        let Some(parent) = node.parent else {
            steps.reverse();
            return Ok(steps);
        };
        // a chain longer than the arena must loop
        if steps.len() >= arena.len() {
            break;
        }
        let Some(movie) = node.via.clone() else {
            break;
        };
        steps.push(Step {
            movie,
            person: node.person.clone(),
        });
        current = parent;
    }

    error!(
        node = current.index(),
        steps = steps.len(),
        "search node chain is malformed"
    );
    Err(DegreesError::MalformedChain {
        node: current.index(),
    })
}

/// Finds a shortest path between two people.
pub fn shortest_path(
    catalogue: &Catalogue,
    source: &PersonId,
    target: &PersonId,
) -> Result<SearchOutcome> {
    PathSearch::new(catalogue, source, target)?.run()
}

/// Whether any path links the two people. Uses a depth-first walk, which
/// finds a path but not necessarily a shortest one.
pub fn is_connected(
    catalogue: &Catalogue,
    source: &PersonId,
    target: &PersonId,
) -> Result<bool> {
    catalogue.require_person(source)?;
    catalogue.require_person(target)?;
    if source == target {
        return Ok(true);
    }

    let mut arena = NodeArena::new();
    let mut frontier = StackFrontier::new();
    let mut explored = HashSet::from([source.clone()]);
    let root = arena.push(SearchNode::root(source.clone()));
    frontier.add(root, source.clone());

    while !frontier.is_empty() {
        let current = frontier.remove_next()?;
        let Some(person) = arena.get(current).map(|n| n.person.clone()) else {
            return Err(DegreesError::MalformedChain {
                node: current.index(),
            });
        };
        for (movie, neighbor) in catalogue.neighbors(&person) {
            if neighbor == *target {
                return Ok(true);
            }
            if explored.insert(neighbor.clone()) {
                let index = arena.push(SearchNode {
                    person: neighbor.clone(),
                    via: Some(movie),
                    parent: Some(current),
                });
                frontier.add(index, neighbor);
            }
        }
    }
    Ok(false)
}
