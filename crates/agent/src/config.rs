/// Tunable thresholds of the rule pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyConfig {
    /// Heal when health drops strictly below this.
    pub heal_health_threshold: i32,
    /// A single attacking wanderer triggers light when health is strictly below this.
    pub light_health_threshold: i32,
    /// Turns after activation during which the heal window stays open.
    pub heal_duration: u32,
    /// Turns after activation during which the light window stays open.
    pub light_duration: u32,
    /// Path-cost radius searched first when fleeing a slasher.
    pub slasher_escape_radius: u32,
    /// Wider radius searched when the first one has no safe cell.
    pub slasher_escape_fallback_radius: u32,
    /// Wanderers strictly closer than this path cost weigh on the slasher escape ranking.
    pub wanderer_awareness_radius: u32,
    /// A spawning slasher with more turns than this left is ignored.
    pub slasher_spawn_grace: i32,
    /// Attacking wanderers sit strictly between these path costs.
    pub attacking_min_distance: u32,
    pub attacking_max_distance: u32,
    /// Attacking wanderers must have strictly more lifetime than this.
    pub attacking_min_lifetime: i32,
    /// Attach flavour messages to MOVE and WAIT.
    pub talk: bool,
}

impl StrategyConfig {
    pub const DEFAULT_HEAL_HEALTH_THRESHOLD: i32 = 220;
    pub const DEFAULT_LIGHT_HEALTH_THRESHOLD: i32 = 100;
    pub const DEFAULT_HEAL_DURATION: u32 = 5;
    pub const DEFAULT_LIGHT_DURATION: u32 = 3;

    pub fn new() -> Self {
        Self {
            heal_health_threshold: Self::DEFAULT_HEAL_HEALTH_THRESHOLD,
            light_health_threshold: Self::DEFAULT_LIGHT_HEALTH_THRESHOLD,
            heal_duration: Self::DEFAULT_HEAL_DURATION,
            light_duration: Self::DEFAULT_LIGHT_DURATION,
            slasher_escape_radius: 3,
            slasher_escape_fallback_radius: 5,
            wanderer_awareness_radius: 5,
            slasher_spawn_grace: 3,
            attacking_min_distance: 2,
            attacking_max_distance: 10,
            attacking_min_lifetime: 3,
            talk: false,
        }
    }

    pub fn with_talk(mut self, talk: bool) -> Self {
        self.talk = talk;
        self
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::new()
    }
}
