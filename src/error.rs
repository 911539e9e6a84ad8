use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Game already in progress")]
    GameInProgress,

    #[error("Only the host can do that")]
    NotHost,

    #[error("No round is active")]
    RoundNotActive,

    #[error("Player already answered this round")]
    AlreadyAnswered,

    #[error("Player is not on a team")]
    UnresolvedTeam,

    #[error("At least 2 players are needed to form teams")]
    InsufficientPlayers,
}
