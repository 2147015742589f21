/// Game constants announced once at startup.
///
/// The decision engine does not consume these today; they are kept on the
/// [`crate::World`] so rules that model sanity loss or spawn timing can read
/// them without another protocol change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConstants {
    /// Sanity lost per turn when no other explorer is nearby.
    pub sanity_loss_lonely: i32,
    /// Sanity lost per turn when grouped with another explorer.
    pub sanity_loss_group: i32,
    /// Turns a wanderer spends spawning.
    pub wanderer_spawn_time: i32,
    /// Turns a wanderer stays on the map after spawning.
    pub wanderer_life_time: i32,
}

impl GameConstants {
    // ===== league defaults, used when a test needs a plausible world =====
    pub const DEFAULT_SANITY_LOSS_LONELY: i32 = 3;
    pub const DEFAULT_SANITY_LOSS_GROUP: i32 = 1;
    pub const DEFAULT_WANDERER_SPAWN_TIME: i32 = 3;
    pub const DEFAULT_WANDERER_LIFE_TIME: i32 = 40;

    pub const fn new(
        sanity_loss_lonely: i32,
        sanity_loss_group: i32,
        wanderer_spawn_time: i32,
        wanderer_life_time: i32,
    ) -> Self {
        Self {
            sanity_loss_lonely,
            sanity_loss_group,
            wanderer_spawn_time,
            wanderer_life_time,
        }
    }
}

impl Default for GameConstants {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_SANITY_LOSS_LONELY,
            Self::DEFAULT_SANITY_LOSS_GROUP,
            Self::DEFAULT_WANDERER_SPAWN_TIME,
            Self::DEFAULT_WANDERER_LIFE_TIME,
        )
    }
}
