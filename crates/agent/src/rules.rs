//! The six pipeline rules, highest priority first.
//!
//! Each rule is a leaf node: it either commits an action on the context and
//! succeeds, or fails so the selector moves on.

use kutulu_core::{MapCase, Minion};

use crate::action::Action;
use crate::behavior::{Behavior, Selector, Status};
use crate::context::{DecisionContext, StrategyRule};

const SLASHER_MESSAGE: &str = "Slasher!";
const FEAR_MESSAGE: &str = "Fear!!";
const IDLE_MESSAGE: &str = "That's ok";

/// Builds the rule pipeline in priority order.
pub fn pipeline<'a>() -> Selector<DecisionContext<'a>> {
    let rules: Vec<Box<dyn Behavior<DecisionContext<'a>>>> = vec![
        Box::new(EscapeSlashers),
        Box::new(EscapeWanderers::contact()),
        Box::new(EscapeWanderers::targeting()),
        Box::new(UseHeal),
        Box::new(UseLight),
        Box::new(Idle),
    ];
    Selector::new(rules)
}

/// Flees the strike line of an active slasher.
pub struct EscapeSlashers;

impl<'a> Behavior<DecisionContext<'a>> for EscapeSlashers {
    fn tick(&self, ctx: &mut DecisionContext<'a>) -> Status {
        if !ctx.threats.slasher_risk {
            return Status::Failure;
        }

        let me = ctx.agent_position();
        let map = ctx.world.map();
        let finder = ctx.finder();
        let nearby: Vec<&Minion> = ctx
            .world
            .wanderers()
            .filter(|wanderer| {
                finder.real_distance(me, wanderer.position) < ctx.config.wanderer_awareness_radius
            })
            .collect();

        let ranked = ctx.rank_by_distance(
            map.cases_within_path_cost(me, ctx.config.slasher_escape_radius),
            &nearby,
        );
        let target = first_safe(ctx, ranked).or_else(|| {
            tracing::debug!("no safe cell in escape radius, widening");
            first_safe(
                ctx,
                map.cases_within_path_cost(me, ctx.config.slasher_escape_fallback_radius),
            )
        });

        match target {
            Some(case) => ctx.move_to(StrategyRule::EscapeSlashers, case.position, SLASHER_MESSAGE),
            None => {
                tracing::debug!("cornered by slashers, no safe cell");
                Status::Failure
            }
        }
    }
}

fn first_safe(ctx: &DecisionContext<'_>, cases: Vec<MapCase>) -> Option<MapCase> {
    cases
        .into_iter()
        .find(|case| !ctx.slasher_risk_at(case.position))
}

/// Which wanderer set an [`EscapeWanderers`] node reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WandererThreat {
    Contact,
    Targeting,
}

/// Steps to the adjacent cell farthest from a set of wanderers.
pub struct EscapeWanderers {
    threat: WandererThreat,
}

impl EscapeWanderers {
    pub fn contact() -> Self {
        Self {
            threat: WandererThreat::Contact,
        }
    }

    pub fn targeting() -> Self {
        Self {
            threat: WandererThreat::Targeting,
        }
    }

    fn rule(&self) -> StrategyRule {
        match self.threat {
            WandererThreat::Contact => StrategyRule::EscapeContactWanderers,
            WandererThreat::Targeting => StrategyRule::EscapeTargetingWanderers,
        }
    }
}

impl<'a> Behavior<DecisionContext<'a>> for EscapeWanderers {
    fn tick(&self, ctx: &mut DecisionContext<'a>) -> Status {
        let threatening = match self.threat {
            WandererThreat::Contact => ctx.threats.contact.clone(),
            WandererThreat::Targeting => ctx.threats.targeting.clone(),
        };
        if threatening.is_empty() {
            return Status::Failure;
        }

        let me = ctx.agent_position();
        let safe: Vec<MapCase> = ctx
            .world
            .map()
            .cases_within_path_cost(me, 1)
            .into_iter()
            .filter(|case| !ctx.slasher_risk_at(case.position))
            .collect();

        match ctx.rank_by_distance(safe, &threatening).first() {
            Some(best) => ctx.move_to(self.rule(), best.position, FEAR_MESSAGE),
            None => Status::Failure,
        }
    }
}

/// Activates the heal effect when hurt and nothing else is running.
pub struct UseHeal;

impl<'a> Behavior<DecisionContext<'a>> for UseHeal {
    fn tick(&self, ctx: &mut DecisionContext<'a>) -> Status {
        let agent = &ctx.world.agent;
        let supplies = &agent.supplies;
        let applies = agent.health() < ctx.config.heal_health_threshold
            && !supplies.heal_active()
            && !supplies.light_active()
            && supplies.heal_charges > 0;
        if !applies {
            return Status::Failure;
        }
        ctx.commit(StrategyRule::UseHeal, Action::Plan)
    }
}

/// Lights up when wanderers close in on the agent.
pub struct UseLight;

impl<'a> Behavior<DecisionContext<'a>> for UseLight {
    fn tick(&self, ctx: &mut DecisionContext<'a>) -> Status {
        let agent = &ctx.world.agent;
        let supplies = &agent.supplies;
        let attacking = ctx.threats.attacking.len();
        let pressed =
            attacking >= 2 || (attacking >= 1 && agent.health() < ctx.config.light_health_threshold);
        let applies = pressed
            && !supplies.light_active()
            && !supplies.heal_active()
            && supplies.light_charges > 0;
        if !applies {
            return Status::Failure;
        }
        ctx.commit(StrategyRule::UseLight, Action::Light)
    }
}

/// Terminal rule; always succeeds.
pub struct Idle;

impl<'a> Behavior<DecisionContext<'a>> for Idle {
    fn tick(&self, ctx: &mut DecisionContext<'a>) -> Status {
        ctx.commit(StrategyRule::Idle, Action::wait().with_message(IDLE_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use kutulu_core::{
        EntityId, Explorer, GameConstants, Map, MinionState, Player, Point, Supplies, Turn, World,
    };

    fn room(agent: Point, health: i32) -> World {
        let rows = [".....", ".....", ".....", ".....", "....."];
        let map = Map::from_rows(5, 5, &rows).expect("valid grid");
        World::new(
            map,
            GameConstants::default(),
            Explorer::new(Player::new(EntityId(0), agent).with_health(health)),
        )
    }

    fn hunter(id: i32, at: Point) -> Minion {
        Minion::wanderer(EntityId(id), at, 20)
            .with_state(MinionState::Stalking)
            .with_target(Some(EntityId(0)))
    }

    fn run<B: for<'a> Behavior<DecisionContext<'a>>>(
        node: &B,
        world: &World,
        config: &StrategyConfig,
    ) -> Option<(StrategyRule, Action)> {
        let mut ctx = DecisionContext::new(world, config);
        node.tick(&mut ctx);
        ctx.take_decision()
    }

    #[test]
    fn heal_blocked_by_active_light() {
        let config = StrategyConfig::default();
        let mut world = room(Point::new(2, 2), 100);
        assert_eq!(
            run(&UseHeal, &world, &config),
            Some((StrategyRule::UseHeal, Action::Plan))
        );

        world.agent.supplies.use_light(Turn(0), 3);
        assert_eq!(run(&UseHeal, &world, &config), None);
    }

    #[test]
    fn heal_needs_a_charge_and_low_health() {
        let config = StrategyConfig::default();
        let healthy = room(Point::new(2, 2), 220);
        assert_eq!(run(&UseHeal, &healthy, &config), None);

        let mut empty = room(Point::new(2, 2), 10);
        empty.agent.supplies = Supplies::new(0, 3);
        assert_eq!(run(&UseHeal, &empty, &config), None);
    }

    #[test]
    fn light_requires_two_hunters_or_one_when_weak() {
        let config = StrategyConfig::default();
        // Path cost 4 from the agent, inside the attacking band.
        let one = room(Point::new(0, 0), 150).with_minion(hunter(10, Point::new(4, 0)));
        assert_eq!(run(&UseLight, &one, &config), None);

        let mut weak = one.clone();
        weak.agent.player.health = 99;
        assert_eq!(
            run(&UseLight, &weak, &config),
            Some((StrategyRule::UseLight, Action::Light))
        );

        let two = one.with_minion(hunter(11, Point::new(0, 4)));
        assert_eq!(
            run(&UseLight, &two, &config),
            Some((StrategyRule::UseLight, Action::Light))
        );
    }

    #[test]
    fn idle_talks_only_when_enabled() {
        let world = room(Point::new(2, 2), 250);
        let quiet = StrategyConfig::default();
        assert_eq!(
            run(&Idle, &world, &quiet),
            Some((StrategyRule::Idle, Action::wait()))
        );

        let chatty = StrategyConfig::default().with_talk(true);
        assert_eq!(
            run(&Idle, &world, &chatty).map(|(_, action)| action.to_string()),
            Some("WAIT That's ok".to_string())
        );
    }

    #[test]
    fn wanderer_escape_falls_through_when_staying_is_best() {
        let config = StrategyConfig::default();
        // Dead end: the only other cell holds the wanderer itself.
        let rows = ["#.#", "#.#"];
        let map = Map::from_rows(3, 2, &rows).expect("valid grid");
        let world = World::new(
            map,
            GameConstants::default(),
            Explorer::new(Player::new(EntityId(0), Point::new(1, 0))),
        )
        .with_minion(hunter(10, Point::new(1, 1)));
        assert_eq!(run(&EscapeWanderers::contact(), &world, &config), None);
    }

    fn grid_world(rows: &[&str], agent: Point) -> World {
        let map = Map::from_rows(rows[0].len(), rows.len(), rows).expect("valid grid");
        World::new(
            map,
            GameConstants::default(),
            Explorer::new(Player::new(EntityId(0), agent)),
        )
    }

    fn slasher(id: i32, at: Point) -> Minion {
        Minion::slasher(EntityId(id), at, 0).with_state(MinionState::Wandering)
    }

    fn drifter(id: i32, at: Point, target: Option<i32>) -> Minion {
        Minion::wanderer(EntityId(id), at, 20)
            .with_state(MinionState::Wandering)
            .with_target(target.map(EntityId))
    }

    fn escape_target(world: &World) -> Option<Point> {
        run(&EscapeSlashers, world, &StrategyConfig::default())
            .and_then(|(_, action)| action.destination())
    }

    #[test]
    fn slasher_escape_ties_resolve_to_last_box_cell() {
        let world = grid_world(&["......."; 7], Point::new(3, 3))
            .with_minion(slasher(9, Point::new(0, 3)));
        // (6,3) comes last in box order but sits on the slasher's row.
        assert_eq!(escape_target(&world), Some(Point::new(5, 4)));
    }

    #[test]
    fn slasher_escape_weighs_only_wanderers_inside_awareness_radius() {
        let base = grid_world(&["......."; 7], Point::new(3, 3))
            .with_minion(slasher(9, Point::new(0, 3)));

        // Path cost exactly 5: ignored, same cell as with no wanderer at all.
        let at_radius = base.clone().with_minion(drifter(10, Point::new(6, 1), None));
        assert_eq!(escape_target(&at_radius), Some(Point::new(5, 4)));

        // Path cost 4: the ranking moves away from it.
        let inside = base.with_minion(drifter(10, Point::new(6, 2), None));
        assert_eq!(escape_target(&inside), Some(Point::new(3, 6)));
    }

    #[test]
    fn slasher_escape_widens_when_nearby_cells_are_exposed() {
        let rows = [".......", "######.", "######."];
        let world = grid_world(&rows, Point::new(2, 0)).with_minion(slasher(9, Point::new(0, 0)));
        // Every cell within cost 3 lies on row 0; (6,1) is cost 5 away.
        assert_eq!(escape_target(&world), Some(Point::new(6, 1)));
    }

    #[test]
    fn slasher_escape_falls_through_when_cornered() {
        let world = grid_world(&["......"], Point::new(3, 0)).with_minion(slasher(9, Point::new(0, 0)));
        assert_eq!(run(&EscapeSlashers, &world, &StrategyConfig::default()), None);
    }

    #[test]
    fn contact_escape_skips_cells_in_slasher_line() {
        let config = StrategyConfig::default();
        let open = room(Point::new(2, 2), 250).with_minion(hunter(10, Point::new(2, 3)));
        assert_eq!(
            run(&EscapeWanderers::contact(), &open, &config),
            Some((
                StrategyRule::EscapeContactWanderers,
                Action::move_to(Point::new(3, 2))
            ))
        );

        // A slasher down column 3 rules out (3,2).
        let watched = open.with_minion(slasher(9, Point::new(3, 0)));
        assert_eq!(
            run(&EscapeWanderers::contact(), &watched, &config),
            Some((
                StrategyRule::EscapeContactWanderers,
                Action::move_to(Point::new(2, 1))
            ))
        );
    }

    #[test]
    fn targeting_escape_fires_when_nothing_is_in_contact() {
        let config = StrategyConfig::default();
        // Two cells away, chasing a rival who is also two cells away.
        let world = room(Point::new(2, 2), 250)
            .with_rival(Player::new(EntityId(1), Point::new(2, 0)))
            .with_minion(drifter(10, Point::new(2, 4), Some(1)));

        let mut ctx = DecisionContext::new(&world, &config);
        assert!(ctx.threats.contact.is_empty());
        assert!(pipeline().tick(&mut ctx).is_success());
        assert_eq!(
            ctx.take_decision(),
            Some((
                StrategyRule::EscapeTargetingWanderers,
                Action::move_to(Point::new(3, 2))
            ))
        );
    }

    #[test]
    fn pipeline_always_commits() {
        let config = StrategyConfig::default();
        let world = room(Point::new(2, 2), 250);
        let mut ctx = DecisionContext::new(&world, &config);
        assert!(pipeline().tick(&mut ctx).is_success());
        assert_eq!(
            ctx.take_decision().map(|(rule, _)| rule),
            Some(StrategyRule::Idle)
        );
    }
}
