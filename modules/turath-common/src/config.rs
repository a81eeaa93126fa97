use anyhow::Result;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: Option<String>,

    // Similarity
    /// Overall score at or above which a pair is suggested for linking.
    pub similarity_threshold: f64,
    /// Overall score at or above which a new candidate is persisted for
    /// curator review. Kept below the link threshold so review-band pairs
    /// also reach the queue.
    pub candidate_floor_threshold: f64,

    // Curation
    /// Default page size of the curator review queue.
    pub review_queue_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            similarity_threshold: std::env::var("SIMILARITY_THRESHOLD")
                .unwrap_or_else(|_| "0.75".to_string())
                .parse()
                .unwrap_or(0.75),
            candidate_floor_threshold: std::env::var("CANDIDATE_FLOOR_THRESHOLD")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()
                .unwrap_or(0.5),
            review_queue_limit: std::env::var("REVIEW_QUEUE_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            similarity_threshold: 0.75,
            candidate_floor_threshold: 0.5,
            review_queue_limit: 50,
        }
    }
}
