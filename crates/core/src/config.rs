/// Rule constants shared by the engine and the runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Players required before a match may start.
    pub const MIN_PLAYERS: usize = 4;
    /// Wolves assigned at match start.
    pub const WOLF_COUNT: usize = 1;
    /// Action payload field naming the targeted player.
    pub const TARGET_FIELD: &'static str = "player";
}
