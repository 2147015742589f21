use kutulu_core::World;

use crate::action::Action;
use crate::behavior::Behavior;
use crate::config::StrategyConfig;
use crate::context::{DecisionContext, StrategyRule};
use crate::rules;

/// Picks one action per turn from the current world snapshot.
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    config: StrategyConfig,
}

impl DecisionEngine {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Runs the rule pipeline and returns the committed action.
    ///
    /// Expired effect windows are closed first. When the committed action
    /// is `PLAN` or `LIGHT` the matching charge is consumed here, so the
    /// world already reflects the action once this returns.
    pub fn decide(&self, world: &mut World) -> Action {
        let turn = world.turn;
        world.agent.supplies.expire(turn);

        let (rule, action) = {
            let mut ctx = DecisionContext::new(world, &self.config);
            rules::pipeline().tick(&mut ctx);
            ctx.take_decision().unwrap_or_else(|| {
                tracing::warn!(%turn, "pipeline committed nothing, waiting");
                (StrategyRule::Idle, Action::wait())
            })
        };

        let supplies = &mut world.agent.supplies;
        match action {
            Action::Plan => {
                supplies.use_heal(turn, self.config.heal_duration);
            }
            Action::Light => {
                supplies.use_light(turn, self.config.light_duration);
            }
            _ => {}
        }

        tracing::info!(
            %turn,
            %rule,
            %action,
            heal_charges = supplies.heal_charges,
            light_charges = supplies.light_charges,
            "action chosen"
        );
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kutulu_core::{EntityId, Explorer, GameConstants, Map, Player, Point, Supplies};

    fn world(health: i32, supplies: Supplies) -> World {
        let map = Map::from_rows(3, 1, &["..."]).expect("valid grid");
        World::new(
            map,
            GameConstants::default(),
            Explorer::new(Player::new(EntityId(0), Point::new(1, 0)).with_health(health))
                .with_supplies(supplies),
        )
    }

    #[test]
    fn healthy_agent_waits() {
        let engine = DecisionEngine::default();
        let mut world = world(250, Supplies::default());
        assert_eq!(engine.decide(&mut world), Action::wait());
        assert_eq!(world.agent.supplies, Supplies::default());
    }

    #[test]
    fn heal_consumes_charge_and_blocks_repeat() {
        let engine = DecisionEngine::default();
        let mut world = world(100, Supplies::new(2, 0));

        assert_eq!(engine.decide(&mut world), Action::Plan);
        assert_eq!(world.agent.supplies.heal_charges, 1);
        assert!(world.agent.supplies.heal_active());

        // Same turn again: window still open, no second charge spent.
        assert_eq!(engine.decide(&mut world), Action::wait());
        assert_eq!(world.agent.supplies.heal_charges, 1);
    }
}
