//! Aggregate world snapshot and its per-turn update.
//!
//! The world owns the immutable [`Map`] and all mutable entity state. Each
//! turn the protocol adapter hands over a batch of [`EntityRecord`]s and
//! [`World::apply_turn`] folds it in:
//!
//! - players are updated in place (they never disappear)
//! - reported minions are updated in place or inserted
//! - minions missing from the batch have despawned and are removed
//! - the turn counter advances

use std::collections::HashSet;

use crate::config::GameConstants;
use crate::entities::{EntityId, Explorer, Minion, MinionState, Player, Turn};
use crate::error::CoreError;
use crate::geometry::Point;
use crate::map::Map;

/// Entity kind tag of a protocol record.
///
/// Unrecognised tags parse into [`EntityTag::Other`] and are skipped by
/// updates, so newer protocol revisions do not break the bot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityTag {
    Explorer,
    Wanderer,
    Slasher,
    #[strum(default)]
    Other(String),
}

impl EntityTag {
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|_| EntityTag::Other(raw.to_owned()))
    }
}

/// One entity line of a turn batch.
///
/// Field meaning depends on the tag:
/// - explorers: `param0` health, the others unused
/// - minions: `param0` kind counter, `param1` state id, `param2` target id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
    pub tag: EntityTag,
    pub id: EntityId,
    pub position: Point,
    pub param0: i32,
    pub param1: i32,
    pub param2: i32,
}

impl EntityRecord {
    pub fn new(tag: EntityTag, id: i32, x: i32, y: i32, params: [i32; 3]) -> Self {
        Self {
            tag,
            id: EntityId(id),
            position: Point::new(x, y),
            param0: params[0],
            param1: params[1],
            param2: params[2],
        }
    }
}

/// Everything the decision engine may look at for one turn.
#[derive(Clone, Debug)]
pub struct World {
    map: Map,
    pub constants: GameConstants,
    pub agent: Explorer,
    pub rivals: Vec<Player>,
    pub minions: Vec<Minion>,
    pub turn: Turn,
}

impl World {
    pub fn new(map: Map, constants: GameConstants, agent: Explorer) -> Self {
        Self {
            map,
            constants,
            agent,
            rivals: Vec::new(),
            minions: Vec::new(),
            turn: Turn::ZERO,
        }
    }

    pub fn with_rival(mut self, rival: Player) -> Self {
        self.rivals.push(rival);
        self
    }

    pub fn with_minion(mut self, minion: Minion) -> Self {
        self.minions.push(minion);
        self
    }

    /// Builds the initial world from the startup batch.
    ///
    /// The first record is always the controlled agent. Further explorers
    /// become rivals and minion records seed the minion list.
    pub fn from_startup(
        map: Map,
        constants: GameConstants,
        records: &[EntityRecord],
    ) -> Result<Self, CoreError> {
        let (first, rest) = records.split_first().ok_or(CoreError::MissingAgent)?;
        let agent = Explorer::new(Player::new(first.id, first.position).with_health(first.param0));
        let mut world = Self::new(map, constants, agent);

        for record in rest {
            match &record.tag {
                EntityTag::Explorer => world
                    .rivals
                    .push(Player::new(record.id, record.position).with_health(record.param0)),
                EntityTag::Wanderer | EntityTag::Slasher => {
                    world.minions.push(minion_from_record(record)?);
                }
                EntityTag::Other(tag) => {
                    tracing::debug!(%tag, id = %record.id, "ignoring startup record");
                }
            }
        }

        tracing::debug!(
            agent = %world.agent.id(),
            rivals = world.rivals.len(),
            minions = world.minions.len(),
            "world initialised"
        );
        Ok(world)
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Folds one turn's batch into the world.
    ///
    /// # Errors
    ///
    /// Fails with [`CoreError::UnknownMinionState`] when a minion record
    /// carries a state id outside the known set, and with
    /// [`CoreError::MissingAgent`] on an empty batch.
    pub fn apply_turn(&mut self, records: &[EntityRecord]) -> Result<(), CoreError> {
        let (first, rest) = records.split_first().ok_or(CoreError::MissingAgent)?;
        self.agent.player.position = first.position;
        self.agent.player.health = first.param0;

        let mut reported: HashSet<EntityId> = HashSet::with_capacity(rest.len());
        for record in rest {
            match &record.tag {
                EntityTag::Explorer => self.update_rival(record),
                EntityTag::Wanderer | EntityTag::Slasher => {
                    reported.insert(record.id);
                    self.update_minion(record)?;
                }
                EntityTag::Other(tag) => {
                    tracing::debug!(%tag, id = %record.id, "ignoring record");
                }
            }
        }

        let before = self.minions.len();
        self.minions.retain(|minion| reported.contains(&minion.id));
        let despawned = before - self.minions.len();

        self.turn = self.turn.next();
        tracing::debug!(
            turn = %self.turn,
            minions = self.minions.len(),
            despawned,
            "world updated"
        );
        Ok(())
    }

    fn update_rival(&mut self, record: &EntityRecord) {
        match self.rivals.iter_mut().find(|rival| rival.id == record.id) {
            Some(rival) => {
                rival.position = record.position;
                rival.health = record.param0;
            }
            None => {
                tracing::warn!(id = %record.id, "unseen explorer, tracking as rival");
                self.rivals
                    .push(Player::new(record.id, record.position).with_health(record.param0));
            }
        }
    }

    fn update_minion(&mut self, record: &EntityRecord) -> Result<(), CoreError> {
        match self.minions.iter_mut().find(|minion| minion.id == record.id) {
            Some(minion) => {
                minion.position = record.position;
                minion.state = MinionState::from_id(record.param1)?;
                minion.target = EntityId::target(record.param2);
                minion.set_counter(record.param0);
            }
            None => self.minions.push(minion_from_record(record)?),
        }
        Ok(())
    }

    /// Rivals followed by the controlled agent.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.rivals.iter().chain(core::iter::once(&self.agent.player))
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        self.all_players().find(|player| player.id == id)
    }

    /// Resolves a minion's weak target reference against the current players.
    pub fn target_of(&self, minion: &Minion) -> Option<&Player> {
        minion.target.and_then(|id| self.player(id))
    }

    pub fn wanderers(&self) -> impl Iterator<Item = &Minion> {
        self.minions.iter().filter(|minion| minion.is_wanderer())
    }

    pub fn slashers(&self) -> impl Iterator<Item = &Minion> {
        self.minions.iter().filter(|minion| minion.is_slasher())
    }
}

fn minion_from_record(record: &EntityRecord) -> Result<Minion, CoreError> {
    let minion = match record.tag {
        EntityTag::Slasher => Minion::slasher(record.id, record.position, record.param0),
        _ => Minion::wanderer(record.id, record.position, record.param0),
    };
    Ok(minion
        .with_state(MinionState::from_id(record.param1)?)
        .with_target(EntityId::target(record.param2)))
}
