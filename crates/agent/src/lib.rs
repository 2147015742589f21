//! Decision engine for the Kutulu explorer.
//!
//! One call to [`DecisionEngine::decide`] per turn: threat detectors run over
//! the world snapshot, then a priority selector of six rules commits exactly
//! one [`Action`].
//!
//! ## Modules
//!
//! - [`behavior`]: selector and node trait the pipeline is built from
//! - [`threats`]: slasher and wanderer detectors
//! - [`rules`]: the rule nodes and [`rules::pipeline`]
//! - [`engine`]: [`DecisionEngine`], which owns the configuration and supply bookkeeping
pub mod action;
pub mod behavior;
pub mod config;
pub mod context;
pub mod engine;
pub mod rules;
pub mod threats;

pub use action::Action;
pub use behavior::{Behavior, Selector, Status};
pub use config::StrategyConfig;
pub use context::{DecisionContext, StrategyRule};
pub use engine::DecisionEngine;
pub use threats::Threats;
