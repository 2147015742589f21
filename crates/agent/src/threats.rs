//! Threat detectors: pure queries over the world snapshot.
//!
//! "Distance" here is Manhattan distance unless the name says path cost;
//! the rule that needs real reachability (attacking wanderers) pays for a
//! search explicitly.

use kutulu_core::{Minion, MinionState, Point, World};

use crate::config::StrategyConfig;

/// Whether an active slasher has an axis-aligned strike line onto `point`.
///
/// Stunned slashers are harmless, and so are spawning ones that still have
/// more than the grace period to go.
pub fn slasher_risk_at(world: &World, config: &StrategyConfig, point: Point) -> bool {
    let finder = world.map().path_finder();
    world
        .slashers()
        .filter(|slasher| is_dangerous_slasher(slasher, config))
        .any(|slasher| finder.has_line_of_sight(point, slasher.position))
}

fn is_dangerous_slasher(slasher: &Minion, config: &StrategyConfig) -> bool {
    match slasher.state {
        MinionState::Stunned => false,
        MinionState::Spawning => slasher
            .state_turns_remaining()
            .is_some_and(|turns| turns <= config.slasher_spawn_grace),
        _ => true,
    }
}

/// Active wanderer: not spawning and with lifetime left.
fn is_live_wanderer(wanderer: &Minion) -> bool {
    !wanderer.state.is_spawning() && wanderer.remaining_lifetime().is_some_and(|left| left > 0)
}

/// Manhattan distance from the wanderer's current target to `point`.
fn target_distance(world: &World, wanderer: &Minion, point: Point) -> Option<u32> {
    world
        .target_of(wanderer)
        .map(|target| target.position.distance_to(point))
}

/// Wanderers about to touch the agent.
///
/// Adjacent ones, plus those two cells away whose target stands next to
/// the agent.
pub fn contact_wanderers(world: &World) -> Vec<&Minion> {
    let me = world.agent.position();
    world
        .wanderers()
        .filter(|wanderer| is_live_wanderer(wanderer))
        .filter(|wanderer| match wanderer.position.distance_to(me) {
            1 => true,
            2 => target_distance(world, wanderer, me).is_some_and(|d| d <= 1),
            _ => false,
        })
        .collect()
}

/// Wanderers whose target stands within two cells of the agent.
pub fn targeting_wanderers(world: &World) -> Vec<&Minion> {
    let me = world.agent.position();
    world
        .wanderers()
        .filter(|wanderer| is_live_wanderer(wanderer))
        .filter(|wanderer| target_distance(world, wanderer, me).is_some_and(|d| d <= 2))
        .collect()
}

/// Wanderers hunting the agent from mid range, used by the light rule.
pub fn attacking_wanderers<'w>(world: &'w World, config: &StrategyConfig) -> Vec<&'w Minion> {
    let me = world.agent.position();
    let agent_id = world.agent.id();
    let finder = world.map().path_finder();
    world
        .wanderers()
        .filter(|wanderer| !wanderer.state.is_spawning())
        .filter(|wanderer| {
            wanderer
                .remaining_lifetime()
                .is_some_and(|left| left > config.attacking_min_lifetime)
        })
        .filter(|wanderer| wanderer.target == Some(agent_id))
        .filter(|wanderer| {
            let cost = finder.real_distance(me, wanderer.position);
            cost > config.attacking_min_distance && cost < config.attacking_max_distance
        })
        .collect()
}

/// All detector results for one decision, computed once up front.
#[derive(Debug, Clone, Default)]
pub struct Threats<'w> {
    pub slasher_risk: bool,
    pub contact: Vec<&'w Minion>,
    pub targeting: Vec<&'w Minion>,
    pub attacking: Vec<&'w Minion>,
}

impl<'w> Threats<'w> {
    pub fn assess(world: &'w World, config: &StrategyConfig) -> Self {
        let threats = Self {
            slasher_risk: slasher_risk_at(world, config, world.agent.position()),
            contact: contact_wanderers(world),
            targeting: targeting_wanderers(world),
            attacking: attacking_wanderers(world, config),
        };
        tracing::debug!(
            slasher_risk = threats.slasher_risk,
            contact = threats.contact.len(),
            targeting = threats.targeting.len(),
            attacking = threats.attacking.len(),
            "threats assessed"
        );
        threats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kutulu_core::{EntityId, Explorer, GameConstants, Map, Player};

    fn world_at(rows: &[&str], agent: Point) -> World {
        let map = Map::from_rows(rows[0].len(), rows.len(), rows).expect("valid grid");
        World::new(
            map,
            GameConstants::default(),
            Explorer::new(Player::new(EntityId(0), agent)),
        )
    }

    fn slasher(id: i32, at: Point, state: MinionState, turns: i32) -> Minion {
        Minion::slasher(EntityId(id), at, turns).with_state(state)
    }

    fn wanderer(id: i32, at: Point, lifetime: i32, target: Option<i32>) -> Minion {
        Minion::wanderer(EntityId(id), at, lifetime)
            .with_state(MinionState::Wandering)
            .with_target(target.map(EntityId))
    }

    #[test]
    fn stunned_and_early_spawning_slashers_are_harmless() {
        let config = StrategyConfig::default();
        let here = Point::new(2, 0);
        let base = world_at(&["....."], here);

        let stunned = base
            .clone()
            .with_minion(slasher(1, Point::new(0, 0), MinionState::Stunned, 4));
        assert!(!slasher_risk_at(&stunned, &config, here));

        let early = base
            .clone()
            .with_minion(slasher(1, Point::new(0, 0), MinionState::Spawning, 4));
        assert!(!slasher_risk_at(&early, &config, here));

        let imminent = base
            .clone()
            .with_minion(slasher(1, Point::new(0, 0), MinionState::Spawning, 3));
        assert!(slasher_risk_at(&imminent, &config, here));

        let rushing = base.with_minion(slasher(1, Point::new(4, 0), MinionState::Rushing, 1));
        assert!(slasher_risk_at(&rushing, &config, here));
    }

    #[test]
    fn wall_shields_from_slasher() {
        let config = StrategyConfig::default();
        let world = world_at(&["..#.."], Point::new(0, 0))
            .with_minion(slasher(1, Point::new(4, 0), MinionState::Wandering, 0));
        assert!(!slasher_risk_at(&world, &config, Point::new(0, 0)));
        assert!(slasher_risk_at(&world, &config, Point::new(3, 0)));
    }

    #[test]
    fn contact_requires_adjacency_or_closing_target() {
        let world = world_at(&["....."; 5], Point::new(2, 2))
            .with_rival(Player::new(EntityId(1), Point::new(2, 1)))
            .with_minion(wanderer(10, Point::new(2, 3), 20, None))
            .with_minion(wanderer(11, Point::new(2, 0), 20, Some(1)))
            .with_minion(wanderer(12, Point::new(0, 2), 20, None))
            .with_minion(wanderer(13, Point::new(3, 2), 0, None))
            .with_minion(
                Minion::wanderer(EntityId(14), Point::new(1, 2), 20)
                    .with_state(MinionState::Spawning),
            );

        let ids: Vec<EntityId> = contact_wanderers(&world).iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![EntityId(10), EntityId(11)]);
    }

    #[test]
    fn targeting_looks_at_the_target_not_the_wanderer() {
        let world = world_at(&[".........."], Point::new(0, 0))
            .with_rival(Player::new(EntityId(1), Point::new(2, 0)))
            .with_rival(Player::new(EntityId(2), Point::new(3, 0)))
            .with_minion(wanderer(10, Point::new(9, 0), 20, Some(1)))
            .with_minion(wanderer(11, Point::new(8, 0), 20, Some(2)))
            .with_minion(wanderer(12, Point::new(7, 0), 20, Some(0)));

        let ids: Vec<EntityId> = targeting_wanderers(&world).iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![EntityId(10), EntityId(12)]);
    }

    #[test]
    fn attacking_band_uses_path_cost() {
        let config = StrategyConfig::default();
        // Straight-line distance 2 to (2,0), but the wall forces a detour
        // of 6 steps, which puts it inside the (2, 10) band.
        let world = world_at(&[".#...", ".#...", "....."], Point::new(0, 0))
            .with_minion(wanderer(10, Point::new(2, 0), 20, Some(0)))
            .with_minion(wanderer(11, Point::new(0, 2), 20, Some(0)))
            .with_minion(wanderer(12, Point::new(4, 2), 3, Some(0)))
            .with_minion(wanderer(13, Point::new(4, 0), 20, Some(5)));

        let ids: Vec<EntityId> = attacking_wanderers(&world, &config)
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![EntityId(10)]);
    }
}
