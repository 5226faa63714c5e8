use thiserror::Error;

/// Why an input was turned down. Rejected inputs leave the session as it
/// was, apart from the player's facing and any notice they raise.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Rejection {
    #[error("target cell is outside the grid")]
    OutOfBounds,

    #[error("target cell is blocked")]
    Blocked,

    #[error("Defeat all enemies first!")]
    LevelLocked,

    #[error("complete every level to unlock level select")]
    SelectionLocked,

    #[error("there is no level {0}")]
    UnknownLevel(usize),

    #[error("enemy speed {0} is not a usable multiplier")]
    InvalidSpeed(f64),

    #[error("the session is over; restart to keep playing")]
    SessionOver,
}
