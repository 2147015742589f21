use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use kutulu_agent::DecisionEngine;

use crate::config::ClientConfig;
use crate::protocol::{ProtocolReader, write_action};

/// Plays one game over the given streams and returns the number of turns
/// answered.
///
/// The game ends when the input closes between two turns.
pub fn run<R, W>(input: R, mut output: W, config: &ClientConfig) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    let mut reader = ProtocolReader::new(input);
    let mut started = Instant::now();
    let mut world = reader.read_startup().context("reading startup input")?;
    let engine = DecisionEngine::new(config.strategy.clone());

    tracing::info!(
        width = world.map().width(),
        height = world.map().height(),
        agent = %world.agent.id(),
        rivals = world.rivals.len(),
        "game started"
    );

    let mut answered = 0u32;
    loop {
        let action = engine.decide(&mut world);
        write_action(&mut output, &action)
            .with_context(|| format!("writing action for turn {}", world.turn))?;
        answered += 1;

        let elapsed = started.elapsed();
        if elapsed > config.turn_budget {
            tracing::warn!(
                turn = %world.turn,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = config.turn_budget.as_millis() as u64,
                "turn over budget"
            );
        } else {
            tracing::debug!(turn = %world.turn, elapsed_us = elapsed.as_micros() as u64, "turn timing");
        }

        let next = world.turn.next();
        let Some(records) = reader
            .read_turn()
            .with_context(|| format!("reading input for turn {next}"))?
        else {
            tracing::info!(turns = answered, "input closed, game over");
            return Ok(answered);
        };

        started = Instant::now();
        world
            .apply_turn(&records)
            .with_context(|| format!("applying turn {next}"))?;
    }
}
