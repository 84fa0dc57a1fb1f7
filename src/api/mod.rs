pub mod odds_api;
pub mod schedule_api;

use crate::errors::FetchError;
use crate::models::{OddsQuote, RawFixture, Season};
use async_trait::async_trait;

/// Source of upcoming games with betting lines for one league
#[async_trait]
pub trait OddsFeed: Send + Sync {
    async fn fetch_odds(&self) -> anyhow::Result<Vec<OddsQuote>>;
}

/// Source of a team's season fixture list
#[async_trait]
pub trait ScheduleFeed: Send + Sync {
    async fn fetch_schedule(
        &self,
        team_code: &str,
        season: Season,
    ) -> Result<Vec<RawFixture>, FetchError>;
}
