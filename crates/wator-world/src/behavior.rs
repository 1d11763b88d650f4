//! Per-agent behavior resolution.
//!
//! One agent, one tick, one transition: prey freeze or wander, predators
//! hunt, wander, or starve. Every random pick draws from the single
//! simulation-owned RNG stream, so a seed and a processing order fully
//! determine a run.

use crate::agent::AgentRegistry;
use crate::grid::Grid;
use crate::neighbors::Neighborhood;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};
use wator_core::{AgentId, Error, Position, Result, RulesConfig, Species};

/// What an agent did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Moved to an empty neighbor
    Moved,
    /// Predator moved onto a prey cell and consumed the occupant
    Fed,
    /// Stayed put: boxed in, or prey pinned by an adjacent predator
    Held,
    /// Predator exceeded the starvation threshold and was removed
    Starved,
}

/// Resolve one agent's turn.
///
/// The caller guarantees `id` was alive when the tick's turn snapshot was
/// taken; agents eaten earlier in the tick never reach this point.
pub(crate) fn take_turn(
    grid: &mut Grid,
    registry: &mut AgentRegistry,
    rules: &RulesConfig,
    rng: &mut ChaCha8Rng,
    id: AgentId,
) -> Result<TurnOutcome> {
    let agent = registry.get(id).ok_or_else(|| {
        Error::InvariantViolation(format!("agent {} took a turn but is not in the registry", id))
    })?;
    let species = agent.species;
    let position = agent.position;

    let neighborhood = Neighborhood::scan(grid, registry, position)?;

    match species {
        Species::Prey => prey_turn(grid, registry, rules, rng, id, position, &neighborhood),
        Species::Predator => predator_turn(grid, registry, rules, rng, id, position, &neighborhood),
    }
}

/// Prey turn: freeze if a predator is one cell away, otherwise wander to a
/// random empty neighbor. A pinned prey also skips its breeding attempt.
fn prey_turn(
    grid: &mut Grid,
    registry: &mut AgentRegistry,
    rules: &RulesConfig,
    rng: &mut ChaCha8Rng,
    id: AgentId,
    position: Position,
    neighborhood: &Neighborhood,
) -> Result<TurnOutcome> {
    let pinned = !neighborhood.predators.is_empty();

    let outcome = if pinned {
        trace!(agent_id = %id, "Prey pinned by adjacent predator");
        TurnOutcome::Held
    } else if let Some(&target) = neighborhood.empty.choose(rng) {
        relocate(grid, registry, id, position, target)?;
        TurnOutcome::Moved
    } else {
        TurnOutcome::Held
    };

    if let Some(agent) = registry.get_mut(id) {
        agent.breed += 1;
    }
    if !pinned {
        try_breed(grid, registry, rules, rng, id)?;
    }

    Ok(outcome)
}

/// Predator turn: consume a random adjacent prey, otherwise wander to a
/// random empty neighbor, otherwise hold. Every non-feeding turn advances
/// the starvation counter; crossing the threshold removes the predator.
fn predator_turn(
    grid: &mut Grid,
    registry: &mut AgentRegistry,
    rules: &RulesConfig,
    rng: &mut ChaCha8Rng,
    id: AgentId,
    position: Position,
    neighborhood: &Neighborhood,
) -> Result<TurnOutcome> {
    let outcome = if let Some(&target) = neighborhood.prey.choose(rng) {
        let victim = grid.get(target).ok_or_else(|| {
            Error::InvariantViolation(format!(
                "prey cell ({}, {}) is empty at predation time",
                target.x, target.y
            ))
        })?;
        registry.remove(victim);
        grid.vacate(target);

        relocate(grid, registry, id, position, target)?;
        if let Some(agent) = registry.get_mut(id) {
            agent.record_feed();
        }
        debug!(predator = %id, prey = %victim, "Predator consumed prey");
        TurnOutcome::Fed
    } else if let Some(&target) = neighborhood.empty.choose(rng) {
        relocate(grid, registry, id, position, target)?;
        if let Some(agent) = registry.get_mut(id) {
            agent.record_hunger();
        }
        TurnOutcome::Moved
    } else {
        if let Some(agent) = registry.get_mut(id) {
            agent.record_hunger();
        }
        TurnOutcome::Held
    };

    if let Some(agent) = registry.get_mut(id) {
        agent.breed += 1;
    }
    try_breed(grid, registry, rules, rng, id)?;

    // Starvation runs last: a predator may still breed on its final tick.
    if let Some(agent) = registry.get(id) {
        if agent.starvation > rules.starvation_threshold {
            let last_position = agent.position;
            grid.vacate(last_position);
            registry.remove(id);
            debug!(predator = %id, "Predator starved");
            return Ok(TurnOutcome::Starved);
        }
    }

    Ok(outcome)
}

/// Move an agent to an empty cell, keeping grid and record in sync.
///
/// The destination is claimed before the origin is released, so a bug that
/// picks an occupied target surfaces as an `InvariantViolation` with the
/// agent still on the board.
fn relocate(
    grid: &mut Grid,
    registry: &mut AgentRegistry,
    id: AgentId,
    from: Position,
    to: Position,
) -> Result<()> {
    grid.place(to, id)?;
    grid.vacate(from);
    if let Some(agent) = registry.get_mut(id) {
        agent.move_to(to);
    }
    Ok(())
}

/// Spawn an offspring next to the agent once its interval has elapsed and
/// a free neighbor exists.
///
/// A failed attempt (no free neighbor) leaves the counter as is, so the
/// agent tries again on its next turn. Offspring do not act in the tick
/// they are born.
fn try_breed(
    grid: &mut Grid,
    registry: &mut AgentRegistry,
    rules: &RulesConfig,
    rng: &mut ChaCha8Rng,
    id: AgentId,
) -> Result<()> {
    if !rules.breeding {
        return Ok(());
    }

    let (species, position, breed) = match registry.get(id) {
        Some(agent) => (agent.species, agent.position, agent.breed),
        None => return Ok(()),
    };

    let interval = match species {
        Species::Prey => rules.prey_breed_interval,
        Species::Predator => rules.predator_breed_interval,
    };
    if breed < interval {
        return Ok(());
    }

    let neighborhood = Neighborhood::scan(grid, registry, position)?;
    if let Some(&target) = neighborhood.empty.choose(rng) {
        let child = registry.spawn(species, target);
        grid.place(target, child)?;
        if let Some(agent) = registry.get_mut(id) {
            agent.record_breed();
        }
        debug!(parent = %id, child = %child, species = %species, "Agent bred");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world(width: i32, height: i32) -> (Grid, AgentRegistry) {
        (Grid::new(width, height).unwrap(), AgentRegistry::new())
    }

    fn spawn_at(
        grid: &mut Grid,
        registry: &mut AgentRegistry,
        species: Species,
        pos: Position,
    ) -> AgentId {
        let id = registry.spawn(species, pos);
        grid.place(pos, id).unwrap();
        id
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_prey_moves_to_an_empty_neighbor() {
        let (mut grid, mut registry) = world(3, 3);
        let center = Position::new(1, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, center);

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            prey,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Moved);
        let new_pos = registry.get(prey).unwrap().position;
        assert_ne!(new_pos, center);
        assert!(
            [
                Position::new(2, 1),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
            .contains(&new_pos)
        );
        assert_eq!(grid.get(new_pos), Some(prey));
        assert_eq!(grid.get(center), None);
    }

    #[test]
    fn test_prey_freezes_next_to_predator_even_with_room() {
        // Prey between a predator and an empty cell: it must not move.
        let (mut grid, mut registry) = world(3, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(1, 0));
        spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(2, 0),
        );

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            prey,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Held);
        assert_eq!(registry.get(prey).unwrap().position, Position::new(1, 0));
        assert_eq!(grid.get(Position::new(0, 0)), None);
    }

    #[test]
    fn test_boxed_in_prey_holds() {
        let (mut grid, mut registry) = world(1, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(0, 0));

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            prey,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Held);
    }

    #[test]
    fn test_predator_consumes_adjacent_prey() {
        let (mut grid, mut registry) = world(2, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(0, 0));
        let predator = spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(1, 0),
        );

        // Give the predator some hunger so the reset is observable
        registry.get_mut(predator).unwrap().starvation = 3;

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            predator,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Fed);
        assert!(!registry.contains(prey));
        assert_eq!(registry.get(predator).unwrap().position, Position::new(0, 0));
        assert_eq!(registry.get(predator).unwrap().starvation, 0);
        assert_eq!(grid.get(Position::new(0, 0)), Some(predator));
        assert_eq!(grid.get(Position::new(1, 0)), None);
    }

    #[test]
    fn test_predator_prefers_prey_over_empty_cells() {
        let (mut grid, mut registry) = world(3, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(2, 0));
        let predator = spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(1, 0),
        );

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            predator,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Fed);
        assert!(!registry.contains(prey));
        assert_eq!(registry.get(predator).unwrap().position, Position::new(2, 0));
    }

    #[test]
    fn test_wandering_predator_gets_hungrier() {
        let (mut grid, mut registry) = world(2, 1);
        let predator = spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(0, 0),
        );

        let outcome = take_turn(
            &mut grid,
            &mut registry,
            &RulesConfig::default(),
            &mut rng(),
            predator,
        )
        .unwrap();

        assert_eq!(outcome, TurnOutcome::Moved);
        assert_eq!(registry.get(predator).unwrap().starvation, 1);
    }

    #[test]
    fn test_boxed_predator_starves_on_fifth_turn() {
        let (mut grid, mut registry) = world(1, 1);
        let predator = spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(0, 0),
        );
        let rules = RulesConfig::default();
        let mut rng = rng();

        for expected in 1u32..=4 {
            let outcome =
                take_turn(&mut grid, &mut registry, &rules, &mut rng, predator).unwrap();
            assert_eq!(outcome, TurnOutcome::Held);
            assert_eq!(registry.get(predator).unwrap().starvation, expected);
        }

        let outcome = take_turn(&mut grid, &mut registry, &rules, &mut rng, predator).unwrap();
        assert_eq!(outcome, TurnOutcome::Starved);
        assert!(!registry.contains(predator));
        assert_eq!(grid.get(Position::new(0, 0)), None);
        assert_eq!(registry.predators_alive(), 0);
    }

    #[test]
    fn test_prey_breeds_after_interval() {
        let (mut grid, mut registry) = world(1, 2);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(0, 0));
        let rules = RulesConfig {
            breeding: true,
            ..Default::default()
        };
        let mut rng = rng();

        // Two turns of wandering between the two cells: no offspring yet
        take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        assert_eq!(registry.prey_alive(), 1);

        // Third turn: the prey moves, then drops an offspring into the
        // cell it vacated.
        take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        assert_eq!(registry.prey_alive(), 2);
        assert_eq!(registry.get(prey).unwrap().breed, 0);
        assert!(grid.iter().all(|(_, cell)| cell.is_some()));
    }

    #[test]
    fn test_breeding_waits_for_a_free_neighbor() {
        let (mut grid, mut registry) = world(1, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(0, 0));
        let rules = RulesConfig {
            breeding: true,
            ..Default::default()
        };
        let mut rng = rng();

        for _ in 0..5 {
            take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        }

        // Boxed in on a 1x1 board: the counter saturates but no offspring
        // ever fits.
        assert_eq!(registry.prey_alive(), 1);
        assert!(registry.get(prey).unwrap().breed >= 3);
    }

    #[test]
    fn test_breeding_disabled_by_default() {
        let (mut grid, mut registry) = world(1, 2);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(0, 0));
        let rules = RulesConfig::default();
        let mut rng = rng();

        for _ in 0..10 {
            take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        }

        assert_eq!(registry.prey_alive(), 1);
    }

    #[test]
    fn test_predator_breeds_after_interval() {
        let (mut grid, mut registry) = world(1, 2);
        let predator = spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(0, 0),
        );
        // High threshold keeps the predator alive long enough to breed
        let rules = RulesConfig {
            breeding: true,
            starvation_threshold: 100,
            ..Default::default()
        };
        let mut rng = rng();

        for _ in 0..7 {
            take_turn(&mut grid, &mut registry, &rules, &mut rng, predator).unwrap();
        }
        assert_eq!(registry.predators_alive(), 1);

        take_turn(&mut grid, &mut registry, &rules, &mut rng, predator).unwrap();
        assert_eq!(registry.predators_alive(), 2);
    }

    #[test]
    fn test_pinned_prey_does_not_breed() {
        let (mut grid, mut registry) = world(3, 1);
        let prey = spawn_at(&mut grid, &mut registry, Species::Prey, Position::new(1, 0));
        spawn_at(
            &mut grid,
            &mut registry,
            Species::Predator,
            Position::new(2, 0),
        );
        let rules = RulesConfig {
            breeding: true,
            ..Default::default()
        };
        let mut rng = rng();

        // Pinned every turn: the empty west cell stays empty even though
        // the breed counter is far past the interval.
        for _ in 0..6 {
            take_turn(&mut grid, &mut registry, &rules, &mut rng, prey).unwrap();
        }

        assert_eq!(registry.prey_alive(), 1);
        assert_eq!(grid.get(Position::new(0, 0)), None);
    }
}
