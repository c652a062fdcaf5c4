//! Actor resolution.
//!
//! The parser never owns the player list. It asks an [`ActorResolver`] for
//! the actors in scope when converting entity selector arguments.
//! [`ActorDirectory`] is an in-memory resolver for hosts that have no
//! directory of their own, and for tests.

use chatcmd_foundation::{ActorId, Position};
use im::{HashMap, Vector};

/// Capability for resolving actors referenced by selector arguments.
pub trait ActorResolver: Send + Sync {
    /// All actors in resolver scope, in iteration order (`@a`, `@p`, `@r`).
    fn actors(&self) -> Vec<ActorId>;

    /// Actors in the invoking actor's local scope (`@e`).
    fn local_actors(&self, invoker: ActorId) -> Vec<ActorId>;

    /// Looks an actor up by exact name.
    fn find_by_name(&self, name: &str) -> Option<ActorId>;

    /// Current position of an actor, if it has one.
    fn position(&self, actor: ActorId) -> Option<Position>;
}

/// One actor known to an [`ActorDirectory`].
#[derive(Clone, Debug, PartialEq)]
pub struct ActorRecord {
    /// Actor identifier.
    pub id: ActorId,
    /// Display name, matched exactly by name lookups.
    pub name: String,
    /// Current position.
    pub position: Position,
    /// Zone (dimension, world, room) the actor is in.
    pub zone: String,
}

/// A persistent, in-memory actor directory.
///
/// Uses structural sharing: [`ActorDirectory::spawn`] returns a new
/// directory and leaves the original untouched, so a host can hand each
/// invocation its own snapshot cheaply.
#[derive(Clone, Debug, Default)]
pub struct ActorDirectory {
    records: Vector<ActorRecord>,
    by_name: HashMap<String, ActorId>,
    next_index: u64,
}

impl ActorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor, returning the new directory and the actor's ID.
    ///
    /// A later actor with the same name shadows the earlier one in name
    /// lookups.
    #[must_use]
    pub fn spawn(
        &self,
        name: impl Into<String>,
        position: Position,
        zone: impl Into<String>,
    ) -> (Self, ActorId) {
        let id = ActorId::new(self.next_index);
        let name = name.into();
        let mut next = self.clone();
        next.by_name.insert(name.clone(), id);
        next.records.push_back(ActorRecord {
            id,
            name,
            position,
            zone: zone.into(),
        });
        next.next_index += 1;
        (next, id)
    }

    /// Returns a directory with `actor` moved to `position`.
    #[must_use]
    pub fn moved(&self, actor: ActorId, position: Position) -> Self {
        let mut next = self.clone();
        if let Some(idx) = next.records.iter().position(|r| r.id == actor) {
            next.records[idx].position = position;
        }
        next
    }

    /// Returns the record of an actor.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<&ActorRecord> {
        self.records.iter().find(|r| r.id == actor)
    }

    /// Returns the name of an actor.
    #[must_use]
    pub fn name_of(&self, actor: ActorId) -> Option<&str> {
        self.get(actor).map(|r| r.name.as_str())
    }

    /// Number of actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the directory has no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all records in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorRecord> {
        self.records.iter()
    }
}

impl ActorResolver for ActorDirectory {
    fn actors(&self) -> Vec<ActorId> {
        self.records.iter().map(|r| r.id).collect()
    }

    fn local_actors(&self, invoker: ActorId) -> Vec<ActorId> {
        let Some(zone) = self.get(invoker).map(|r| &r.zone) else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter(|r| &r.zone == zone)
            .map(|r| r.id)
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<ActorId> {
        self.by_name.get(name).copied()
    }

    fn position(&self, actor: ActorId) -> Option<Position> {
        self.get(actor).map(|r| r.position)
    }
}
