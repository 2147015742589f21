//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use kutulu_agent::StrategyConfig;

/// Everything the binary needs besides the judge's input stream.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Soft per-turn budget; overruns are logged, never enforced.
    pub turn_budget: Duration,
    pub strategy: StrategyConfig,
    /// Directory for the optional log file.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub const DEFAULT_TURN_BUDGET_MS: u64 = 50;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `KUTULU_TURN_BUDGET_MS` - Soft per-turn budget in milliseconds (default: 50)
    /// - `KUTULU_TALK` - Attach flavour messages to MOVE/WAIT (default: false)
    /// - `KUTULU_HEAL_THRESHOLD` - Heal below this health (default: 220)
    /// - `KUTULU_LIGHT_THRESHOLD` - Light for a single hunter below this health (default: 100)
    /// - `KUTULU_LOG_DIR` - Also write logs to `kutulu.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("KUTULU_TURN_BUDGET_MS") {
            config.turn_budget = Duration::from_millis(ms.max(1));
        }

        if let Some(talk) = read_env::<bool>("KUTULU_TALK") {
            config.strategy.talk = talk;
        } else if env::var("KUTULU_TALK").is_ok() {
            // Bare `KUTULU_TALK=` counts as enabled.
            config.strategy.talk = true;
        }

        if let Some(threshold) = read_env::<i32>("KUTULU_HEAL_THRESHOLD") {
            config.strategy.heal_health_threshold = threshold;
        }
        if let Some(threshold) = read_env::<i32>("KUTULU_LIGHT_THRESHOLD") {
            config.strategy.light_health_threshold = threshold;
        }

        config.log_dir = env::var("KUTULU_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            turn_budget: Duration::from_millis(Self::DEFAULT_TURN_BUDGET_MS),
            strategy: StrategyConfig::default(),
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
