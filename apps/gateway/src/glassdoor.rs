//! Glassdoor employer-search client backing the company reply path.

use async_trait::async_trait;
use emo_replies::{CompanyLookup, Employer, LookupError};
use serde::Deserialize;

pub struct GlassdoorClient {
    http: reqwest::Client,
    endpoint: String,
    partner_id: String,
    partner_key: String,
}

impl GlassdoorClient {
    pub fn new(
        http: reqwest::Client,
        api_base: &str,
        partner_id: impl Into<String>,
        partner_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/api.htm", api_base.trim_end_matches('/')),
            partner_id: partner_id.into(),
            partner_key: partner_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmployersEnvelope {
    response: Option<EmployersResponse>,
}

#[derive(Debug, Deserialize)]
struct EmployersResponse {
    #[serde(default)]
    employers: Vec<EmployerRecord>,
}

#[derive(Debug, Deserialize)]
struct EmployerRecord {
    name: String,
    #[serde(rename = "squareLogo")]
    square_logo: Option<String>,
    #[serde(rename = "featuredReview")]
    featured_review: Option<FeaturedReview>,
}

#[derive(Debug, Deserialize)]
struct FeaturedReview {
    #[serde(rename = "attributionURL")]
    attribution_url: Option<String>,
}

fn into_employers(envelope: EmployersEnvelope) -> Vec<Employer> {
    envelope
        .response
        .map(|response| response.employers)
        .unwrap_or_default()
        .into_iter()
        .map(|record| Employer {
            name: record.name,
            square_logo: record.square_logo,
            review_url: record
                .featured_review
                .and_then(|review| review.attribution_url),
        })
        .collect()
}

#[async_trait]
impl CompanyLookup for GlassdoorClient {
    async fn search_employers(&self, keyword: &str) -> Result<Vec<Employer>, LookupError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("t.p", self.partner_id.as_str()),
                ("t.k", self.partner_key.as_str()),
                ("userip", "0.0.0.0"),
                ("useragent", ""),
                ("format", "json"),
                ("v", "1"),
                ("action", "employers"),
                ("q", keyword),
            ])
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let envelope: EmployersEnvelope = response
            .json()
            .await
            .map_err(|err| LookupError::Decode(err.to_string()))?;
        Ok(into_employers(envelope))
    }
}
