use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartyError {
    #[error("At least 2 participants are required to spin, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Not enough players for {teams} teams: have {players}")]
    NotEnoughPlayers { players: usize, teams: usize },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PartyError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

pub type PartyResult<T> = Result<T, PartyError>;
