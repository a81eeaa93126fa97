use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Reference entities ---

/// A country in the catalog. `region` is the macro-region label used by the
/// heritage scorer (e.g. الخليج, الشام).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub region: Option<String>,
}

/// A node of the heritage-field taxonomy (e.g. ألعاب شعبية, فنون أدائية).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageField {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

// --- Games ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Draft => write!(f, "draft"),
            GameStatus::Published => write!(f, "published"),
            GameStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(GameStatus::Draft),
            "published" => Ok(GameStatus::Published),
            "archived" => Ok(GameStatus::Archived),
            other => Err(format!("unknown game status: {other}")),
        }
    }
}

/// A documented traditional game. Contributor-edited; immutable input to the
/// similarity engine at comparison time.
///
/// `description` and `rules` are required for any game eligible for
/// comparison (the engine fails loudly when they are missing). Every other
/// optional field is a genuine absence, not an empty string — the scorers
/// handle each absence with its own documented default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    /// Canonical display name.
    pub name: String,
    /// Local/alternate names across dialects and countries.
    pub local_names: Vec<String>,
    pub country_id: Uuid,
    /// Free-text sub-national region, overrides the country macro-region
    /// when present.
    pub region: Option<String>,
    pub heritage_field_id: Uuid,
    pub game_type: String,

    // Structured attributes
    pub age_group: Option<String>,
    pub practitioners: Option<String>,
    pub players_count: Option<String>,
    pub tools: Vec<String>,
    pub environment: Option<String>,
    pub timing: Option<String>,

    // Free text
    pub description: Option<String>,
    pub rules: Vec<String>,
    pub win_loss_system: Option<String>,
    pub start_end_mechanism: Option<String>,
    pub oral_tradition: Option<String>,
    pub social_context: Option<String>,

    pub tag_ids: Vec<Uuid>,
    /// Set by the curation workflow when the game is merged under a shared
    /// concept. At most one concept per game.
    pub concept_id: Option<Uuid>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A game hydrated with its relations — the comparison input shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWithRelations {
    pub game: Game,
    pub country: Country,
    pub heritage_field: HeritageField,
    pub tags: Vec<Tag>,
}

impl GameWithRelations {
    /// The region string used for heritage comparison: the game's own
    /// sub-national region when documented, else the country macro-region.
    pub fn effective_region(&self) -> Option<&str> {
        self.game
            .region
            .as_deref()
            .or(self.country.region.as_deref())
    }
}
