// game_state.rs

/// Top-level game mode. `GameOver` keeps the crashed frame and final score
/// on screen until the player restarts.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum GameState {
    TitleScreen,
    Playing,
    GameOver,
}
