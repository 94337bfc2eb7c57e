//! Game state types.

/// Lifecycle state of the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// No match has started yet.
    #[default]
    Idle,
    /// A match is running and turns are being taken.
    InProgress,
    /// The last match has ended; its outcome can be settled.
    Complete,
}
