use async_trait::async_trait;
use thiserror::Error;

/// One employer record from the review aggregator. Only the first record of
/// a search is ever used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub name: String,
    pub square_logo: Option<String>,
    pub review_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup returned status {0}")]
    Status(u16),
    #[error("failed to decode lookup response: {0}")]
    Decode(String),
}

/// Company search collaborator. Failures are recovered locally by the
/// company reply builder; they never surface as server errors.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn search_employers(&self, keyword: &str) -> Result<Vec<Employer>, LookupError>;
}
