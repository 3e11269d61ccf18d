//! Frontiers of discovered but not yet expanded search nodes.
//!
//! Both frontiers share one container and membership set and differ only in
//! which end [`Frontier::remove_next`] takes from. The shortest-path engine
//! always uses [`QueueFrontier`]. [`StackFrontier`] is for depth-first walks,
//! which give no shortest-path guarantee.

use std::collections::{HashMap, VecDeque};

use crate::catalogue::PersonId;
use crate::error::FrontierError;
use crate::node::NodeIndex;

pub trait Frontier {
    fn add(&mut self, node: NodeIndex, person: PersonId);
    fn remove_next(&mut self) -> Result<NodeIndex, FrontierError>;
    fn contains_person(&self, person: &PersonId) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Pending {
    entries: VecDeque<(NodeIndex, PersonId)>,
    members: HashMap<PersonId, usize>, // person -> number of pending entries
}

impl Pending {
    fn push(&mut self, node: NodeIndex, person: PersonId) {
        *self.members.entry(person.clone()).or_default() += 1;
        self.entries.push_back((node, person));
    }

    fn release(
        &mut self,
        entry: Option<(NodeIndex, PersonId)>,
    ) -> Result<NodeIndex, FrontierError> {
        let (node, person) = entry.ok_or(FrontierError::Empty)?;
        if let Some(count) = self.members.get_mut(&person) {
            *count -= 1;
            if *count == 0 {
                self.members.remove(&person);
            }
        }
        Ok(node)
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    pending: Pending,
}

impl QueueFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn add(&mut self, node: NodeIndex, person: PersonId) {
        self.pending.push(node, person);
    }

    fn remove_next(&mut self) -> Result<NodeIndex, FrontierError> {
        let entry = self.pending.entries.pop_front();
        self.pending.release(entry)
    }

    fn contains_person(&self, person: &PersonId) -> bool {
        self.pending.members.contains_key(person)
    }

    fn len(&self) -> usize {
        self.pending.entries.len()
    }
}

/// Last in, first out.
#[derive(Debug, Default)]
pub struct StackFrontier {
    pending: Pending,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn add(&mut self, node: NodeIndex, person: PersonId) {
        self.pending.push(node, person);
    }

    fn remove_next(&mut self) -> Result<NodeIndex, FrontierError> {
        let entry = self.pending.entries.pop_back();
        self.pending.release(entry)
    }

    fn contains_person(&self, person: &PersonId) -> bool {
        self.pending.members.contains_key(person)
    }

    fn len(&self) -> usize {
        self.pending.entries.len()
    }
}
