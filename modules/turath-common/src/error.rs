use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TurathError {
    #[error("Game not found: {0}")]
    GameNotFound(Uuid),

    #[error("Similarity candidate not found: {0}")]
    CandidateNotFound(Uuid),

    #[error("Concept not found: {0}")]
    ConceptNotFound(Uuid),

    #[error("Candidate {id} is {status}; only pending candidates can be reviewed")]
    InvalidTransition { id: Uuid, status: String },

    #[error("Game {game_id} is missing `{field}`, which is required for comparison")]
    MissingRequiredField { game_id: Uuid, field: &'static str },

    #[error("Game {game_id} is already linked to concept {existing_concept_id}")]
    AlreadyLinked {
        game_id: Uuid,
        existing_concept_id: Uuid,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
