//! Agent records and the registry that owns them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use wator_core::{AgentId, Position, Species};

/// A live agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub species: Species,
    pub position: Position,
    /// Ticks since the last feed; only predators advance this
    pub starvation: u32,
    /// Ticks since the last reproduction
    pub breed: u32,
}

impl Agent {
    fn new(id: AgentId, species: Species, position: Position) -> Self {
        Self {
            id,
            species,
            position,
            starvation: 0,
            breed: 0,
        }
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }

    pub fn record_feed(&mut self) {
        self.starvation = 0;
    }

    pub fn record_hunger(&mut self) {
        self.starvation += 1;
    }

    pub fn record_breed(&mut self) {
        self.breed = 0;
    }
}

/// Owns the collection of live agents.
///
/// All creation and removal goes through here so the per-species counters
/// and the spawn order stay accurate.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentId, Agent>,
    spawn_order: Vec<AgentId>,
    next_id: u64,
    prey_alive: usize,
    predators_alive: usize,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, species: Species, position: Position) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;

        self.agents.insert(id, Agent::new(id, species, position));
        self.spawn_order.push(id);
        match species {
            Species::Prey => self.prey_alive += 1,
            Species::Predator => self.predators_alive += 1,
        }

        debug!(
            agent_id = %id,
            species = %species,
            x = position.x,
            y = position.y,
            "Agent spawned"
        );
        id
    }

    /// Remove an agent. Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: AgentId) {
        if let Some(agent) = self.agents.remove(&id) {
            match agent.species {
                Species::Prey => self.prey_alive -= 1,
                Species::Predator => self.predators_alive -= 1,
            }
            debug!(agent_id = %id, species = %agent.species, "Agent removed");
        }
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn prey_alive(&self) -> usize {
        self.prey_alive
    }

    pub fn predators_alive(&self) -> usize {
        self.predators_alive
    }

    /// Iterator over all live agents, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    /// Ids of the agents alive right now, newest spawn first.
    ///
    /// Taken once at the start of a tick: agents removed mid-tick are
    /// skipped when their turn comes, and agents born mid-tick are not in
    /// the snapshot at all.
    pub fn turn_order(&self) -> Vec<AgentId> {
        self.spawn_order
            .iter()
            .rev()
            .filter(|id| self.agents.contains_key(*id))
            .copied()
            .collect()
    }
}
