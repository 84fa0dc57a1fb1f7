use crate::api::ScheduleFeed;
use crate::errors::FetchError;
use crate::models::{RawFixture, Season};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const NHL_API_BASE_URL: &str = "https://api-web.nhle.com/v1";

#[derive(Debug, Deserialize)]
struct ClubScheduleResponse {
    #[serde(default)]
    games: Vec<RawFixture>,
}

pub struct NhlScheduleClient {
    client: Client,
    base_url: String,
}

impl NhlScheduleClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: NHL_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch every game of a team's season, past results and upcoming fixtures, in provider order
    pub async fn fetch_club_schedule(
        &self,
        team_code: &str,
        season: Season,
    ) -> Result<Vec<RawFixture>, FetchError> {
        let url = format!(
            "{}/club-schedule-season/{}/{}",
            self.base_url,
            team_code,
            season.id()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        let schedule: ClubScheduleResponse =
            response
                .json()
                .await
                .map_err(|source| FetchError::Decode {
                    url: url.clone(),
                    source,
                })?;

        tracing::info!(
            "Fetched {} games for {} season {}",
            schedule.games.len(),
            team_code,
            season.label()
        );

        Ok(schedule.games)
    }
}

impl Default for NhlScheduleClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleFeed for NhlScheduleClient {
    async fn fetch_schedule(
        &self,
        team_code: &str,
        season: Season,
    ) -> Result<Vec<RawFixture>, FetchError> {
        self.fetch_club_schedule(team_code, season).await
    }
}
