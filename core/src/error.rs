use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown cell token")]
    InvalidToken,
    #[error("Board already holds frozen cells")]
    FrozenBoard,
    #[error("Board holds more than one selected cell")]
    InvalidSelection,
    #[error("Operation not available in the current mode")]
    WrongMode,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
