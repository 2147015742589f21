//! Blackboard shared by the rule pipeline for one decision.

use kutulu_core::{MapCase, Minion, PathFinder, Point, World};

use crate::action::Action;
use crate::behavior::Status;
use crate::config::StrategyConfig;
use crate::threats::{self, Threats};

/// Names of the pipeline rules, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StrategyRule {
    EscapeSlashers,
    EscapeContactWanderers,
    EscapeTargetingWanderers,
    UseHeal,
    UseLight,
    Idle,
}

/// Context for one decision.
///
/// Threat detectors run once when the context is built; every rule reads
/// the same assessment. The world is read-only here: supply consumption is
/// applied by the engine after the pipeline has committed.
pub struct DecisionContext<'a> {
    pub world: &'a World,
    pub config: &'a StrategyConfig,
    pub threats: Threats<'a>,
    decision: Option<(StrategyRule, Action)>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(world: &'a World, config: &'a StrategyConfig) -> Self {
        Self {
            world,
            config,
            threats: Threats::assess(world, config),
            decision: None,
        }
    }

    pub fn finder(&self) -> PathFinder<'a> {
        self.world.map().path_finder()
    }

    pub fn agent_position(&self) -> Point {
        self.world.agent.position()
    }

    pub fn slasher_risk_at(&self, point: Point) -> bool {
        threats::slasher_risk_at(self.world, self.config, point)
    }

    /// Sum of path costs from each minion to `point`; unreachable saturates.
    pub fn distance_sum(&self, point: Point, minions: &[&Minion]) -> u32 {
        let finder = self.finder();
        minions.iter().fold(0u32, |sum, minion| {
            sum.saturating_add(finder.real_distance(minion.position, point))
        })
    }

    /// Orders `cases` by descending distance sum to `minions`.
    ///
    /// Stable ascending sort, then reversed: equal scores come out in
    /// reverse bounding-box order.
    pub fn rank_by_distance(&self, cases: Vec<MapCase>, minions: &[&Minion]) -> Vec<MapCase> {
        let mut scored: Vec<(u32, MapCase)> = cases
            .into_iter()
            .map(|case| (self.distance_sum(case.position, minions), case))
            .collect();
        scored.sort_by_key(|(score, _)| *score);
        scored.reverse();
        tracing::debug!(
            candidates = scored.len(),
            best = scored.first().map(|(score, _)| *score),
            "candidates ranked"
        );
        scored.into_iter().map(|(_, case)| case).collect()
    }

    /// Commits the turn's action.
    ///
    /// # Panics
    ///
    /// Panics if an action was already committed. This indicates a bug in the
    /// pipeline (a rule succeeded without short-circuiting the selector).
    pub fn commit(&mut self, rule: StrategyRule, action: Action) -> Status {
        if let Some((previous, _)) = &self.decision {
            panic!("action already committed by {previous}, {rule} tried to commit again");
        }
        let action = match self.config.talk {
            true => action,
            false => strip_message(action),
        };
        self.decision = Some((rule, action));
        Status::Success
    }

    /// Commits a move unless `to` is where the agent already stands.
    ///
    /// Moving in place is not a move; the rule falls through instead.
    pub fn move_to(&mut self, rule: StrategyRule, to: Point, message: &'static str) -> Status {
        if to == self.agent_position() {
            tracing::debug!(%rule, "best cell is the current one, falling through");
            return Status::Failure;
        }
        self.commit(rule, Action::move_to(to).with_message(message))
    }

    pub fn take_decision(self) -> Option<(StrategyRule, Action)> {
        self.decision
    }
}

fn strip_message(action: Action) -> Action {
    match action {
        Action::Move { to, .. } => Action::move_to(to),
        Action::Wait { .. } => Action::wait(),
        other => other,
    }
}
