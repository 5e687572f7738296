/// Packets of the play state.
pub mod game;
