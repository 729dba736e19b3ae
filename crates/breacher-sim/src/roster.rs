//! Dense actor storage with stable ids.
//!
//! Actors live in a `Vec` in spawn order; a side table maps ids to
//! indices. Every system iterates the `Vec` directly, so processing
//! order is spawn order and therefore reproducible. Dead actors stay in
//! place (they are bodies, and the output builder still needs them).

use std::collections::HashMap;

use breacher_core::enums::{Condition, Side};
use breacher_core::types::{ActorId, GridPos};

use crate::actor::Actor;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    actors: Vec<Actor>,
    index: HashMap<ActorId, usize>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next actor id. Ids are never reused.
    pub fn reserve_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a fully built actor. The id must come from
    /// [`Roster::reserve_id`] and be unused.
    pub fn add(&mut self, actor: Actor) {
        let id = actor.id;
        assert!(
            !self.index.contains_key(&id),
            "actor id {} inserted twice",
            id.0
        );
        self.index.insert(id, self.actors.len());
        self.actors.push(actor);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.index.get(&id).map(|&i| &self.actors[i])
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.actors[i]),
            None => None,
        }
    }

    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn at(&self, idx: usize) -> &Actor {
        &self.actors[idx]
    }

    pub fn at_mut(&mut self, idx: usize) -> &mut Actor {
        &mut self.actors[idx]
    }

    /// Spawn-order iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Two distinct actors, mutably. Panics if the indices coincide;
    /// callers never resolve an actor against itself.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Actor, &mut Actor) {
        assert_ne!(a, b, "pair_mut needs two distinct actors");
        if a < b {
            let (left, right) = self.actors.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.actors.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Living actors of one side.
    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(move |a| a.side == side && a.is_alive())
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.living_on(side).count()
    }

    /// Whether any living actor stands on the cell. Down and dead
    /// actors do not block movement.
    pub fn cell_occupied(&self, pos: GridPos) -> bool {
        self.actors
            .iter()
            .any(|a| a.condition == Condition::Alive && a.pos == pos)
    }
}
