//! Typed entities tracked by the [`crate::World`].
//!
//! Players live for the whole process; minions come and go with each turn's
//! batch. Variant checks ("is this a slasher") are enum matches, never type
//! inspection.

use core::fmt;
use core::ops::Add;

use crate::error::CoreError;
use crate::geometry::Point;

/// Server-assigned identifier. Stable for the entity's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub i32);

impl EntityId {
    /// Interprets a raw target field; any negative id means "no target".
    pub fn target(raw: i32) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic turn counter owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Turn(pub u32);

impl Turn {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Add<u32> for Turn {
    type Output = Turn;

    fn add(self, rhs: u32) -> Turn {
        Turn(self.0 + rhs)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An explorer: the controlled agent or a rival.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: EntityId,
    pub position: Point,
    /// Sanity, 0..=250, server-authoritative.
    pub health: i32,
}

impl Player {
    pub const MAX_HEALTH: i32 = 250;

    pub fn new(id: EntityId, position: Point) -> Self {
        Self {
            id,
            position,
            health: Self::MAX_HEALTH,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }
}

/// Consumable charges and their active windows for the controlled agent.
///
/// A window stays open up to and including its expiry turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Supplies {
    pub heal_charges: u32,
    pub light_charges: u32,
    pub heal_until: Option<Turn>,
    pub light_until: Option<Turn>,
}

impl Supplies {
    pub const DEFAULT_HEAL_CHARGES: u32 = 2;
    pub const DEFAULT_LIGHT_CHARGES: u32 = 3;

    pub const fn new(heal_charges: u32, light_charges: u32) -> Self {
        Self {
            heal_charges,
            light_charges,
            heal_until: None,
            light_until: None,
        }
    }

    pub fn heal_active(&self) -> bool {
        self.heal_until.is_some()
    }

    pub fn light_active(&self) -> bool {
        self.light_until.is_some()
    }

    /// Closes every window whose expiry turn lies strictly before `turn`.
    pub fn expire(&mut self, turn: Turn) {
        if self.heal_until.is_some_and(|until| turn > until) {
            self.heal_until = None;
        }
        if self.light_until.is_some_and(|until| turn > until) {
            self.light_until = None;
        }
    }

    /// Consumes a heal charge and opens the heal window until `turn + duration`.
    ///
    /// Returns `false` without side effects when no charge remains.
    pub fn use_heal(&mut self, turn: Turn, duration: u32) -> bool {
        if self.heal_charges == 0 {
            return false;
        }
        self.heal_charges -= 1;
        self.heal_until = Some(turn + duration);
        true
    }

    /// Consumes a light charge and opens the light window until `turn + duration`.
    pub fn use_light(&mut self, turn: Turn, duration: u32) -> bool {
        if self.light_charges == 0 {
            return false;
        }
        self.light_charges -= 1;
        self.light_until = Some(turn + duration);
        true
    }
}

impl Default for Supplies {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HEAL_CHARGES, Self::DEFAULT_LIGHT_CHARGES)
    }
}

/// The controlled agent: a player plus private supply state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explorer {
    pub player: Player,
    pub supplies: Supplies,
}

impl Explorer {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            supplies: Supplies::default(),
        }
    }

    pub fn with_supplies(mut self, supplies: Supplies) -> Self {
        self.supplies = supplies;
        self
    }

    pub fn id(&self) -> EntityId {
        self.player.id
    }

    pub fn position(&self) -> Point {
        self.player.position
    }

    pub fn health(&self) -> i32 {
        self.player.health
    }
}

/// Minion state as reported by the server. The bot never transitions it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[repr(i32)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MinionState {
    Spawning = 0,
    Wandering = 1,
    Stalking = 2,
    Rushing = 3,
    Stunned = 4,
}

impl MinionState {
    /// Maps an external state id; ids outside the known set are fatal.
    pub fn from_id(id: i32) -> Result<Self, CoreError> {
        Self::from_repr(id).ok_or(CoreError::UnknownMinionState(id))
    }

    pub fn is_spawning(self) -> bool {
        matches!(self, MinionState::Spawning)
    }
}

/// Kind-specific minion counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinionKind {
    /// Chases its target by walking.
    Wanderer { remaining_lifetime: i32 },
    /// Strikes along straight lines.
    Slasher { state_turns_remaining: i32 },
}

/// A hostile minion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minion {
    pub id: EntityId,
    pub position: Point,
    pub state: MinionState,
    /// Weak reference; resolve through [`crate::World::player`] at use time.
    pub target: Option<EntityId>,
    pub kind: MinionKind,
}

impl Minion {
    pub fn wanderer(id: EntityId, position: Point, remaining_lifetime: i32) -> Self {
        Self {
            id,
            position,
            state: MinionState::Spawning,
            target: None,
            kind: MinionKind::Wanderer { remaining_lifetime },
        }
    }

    pub fn slasher(id: EntityId, position: Point, state_turns_remaining: i32) -> Self {
        Self {
            id,
            position,
            state: MinionState::Spawning,
            target: None,
            kind: MinionKind::Slasher {
                state_turns_remaining,
            },
        }
    }

    pub fn with_state(mut self, state: MinionState) -> Self {
        self.state = state;
        self
    }

    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    pub fn is_wanderer(&self) -> bool {
        matches!(self.kind, MinionKind::Wanderer { .. })
    }

    pub fn is_slasher(&self) -> bool {
        matches!(self.kind, MinionKind::Slasher { .. })
    }

    /// Remaining lifetime for wanderers, `None` for slashers.
    pub fn remaining_lifetime(&self) -> Option<i32> {
        match self.kind {
            MinionKind::Wanderer { remaining_lifetime } => Some(remaining_lifetime),
            MinionKind::Slasher { .. } => None,
        }
    }

    /// Turns left in the current state for slashers, `None` for wanderers.
    pub fn state_turns_remaining(&self) -> Option<i32> {
        match self.kind {
            MinionKind::Slasher {
                state_turns_remaining,
            } => Some(state_turns_remaining),
            MinionKind::Wanderer { .. } => None,
        }
    }

    /// Overwrites the kind counter with the record's first field.
    pub(crate) fn set_counter(&mut self, counter: i32) {
        match &mut self.kind {
            MinionKind::Wanderer { remaining_lifetime } => *remaining_lifetime = counter,
            MinionKind::Slasher {
                state_turns_remaining,
            } => *state_turns_remaining = counter,
        }
    }
}
