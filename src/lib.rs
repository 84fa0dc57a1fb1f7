pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod utils;
pub mod web;

pub use api::*;
pub use config::Config;
pub use errors::*;
pub use models::*;
pub use service::{ScheduleData, ScheduleService, TrackingOptions};
pub use utils::*;

use api::odds_api::OddsApiClient;
use api::schedule_api::NhlScheduleClient;
use std::sync::Arc;
use utils::presenter::Presenter;
use utils::teams::TeamDirectory;

impl From<&Config> for TrackingOptions {
    fn from(config: &Config) -> Self {
        Self {
            team_code: config.team_code.clone(),
            bookmaker: config.bookmaker.clone(),
            market: config.market.clone(),
            season: config.season,
        }
    }
}

/// Odds client for the configured league, if an API key is set
pub fn odds_client(config: &Config) -> Option<OddsApiClient> {
    config.odds_api_key.clone().map(|api_key| {
        OddsApiClient::new(api_key, config.sport_key.clone())
            .with_base_url(config.odds_api_base_url.clone())
            .with_regions(config.regions.clone())
            .with_market(config.market.clone())
            .with_odds_format(config.odds_format)
    })
}

/// Wire the HTTP clients, team directory and caches together
pub fn build_service(config: &Config) -> ScheduleService {
    let odds_feed: Option<Arc<dyn OddsFeed>> =
        odds_client(config).map(|client| Arc::new(client) as Arc<dyn OddsFeed>);
    let schedule_feed =
        Arc::new(NhlScheduleClient::new().with_base_url(config.schedule_api_base_url.clone()));

    ScheduleService::new(
        TrackingOptions::from(config),
        Arc::new(TeamDirectory::nhl()),
        odds_feed,
        schedule_feed,
        config.cache_ttl,
    )
}

pub fn build_presenter(config: &Config) -> Presenter {
    Presenter::new(config.display_tz, config.odds_format)
}
