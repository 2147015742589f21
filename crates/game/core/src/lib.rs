//! Spatial reasoning and world state for the survival bot.
//!
//! `kutulu-core` holds everything the decision engine queries but never
//! decides on: the immutable [`Map`], the [`PathFinder`] built on it, and the
//! [`World`] snapshot that the protocol adapter refreshes every turn.
//!
//! Entity variants are plain tagged enums. The only mutable state is inside
//! [`World`], which is updated in place from [`EntityRecord`] batches.
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod map;
pub mod world;

pub use config::GameConstants;
pub use entities::{
    EntityId, Explorer, Minion, MinionKind, MinionState, Player, Supplies, Turn,
};
pub use error::{CoreError, ErrorSeverity, GameError};
pub use geometry::{CardinalDirection, Point, Vector};
pub use map::{CellKind, Map, MapCase, PathFinder, UNREACHABLE};
pub use world::{EntityRecord, EntityTag, World};
