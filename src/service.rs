use crate::api::{OddsFeed, ScheduleFeed};
use crate::errors::ScheduleError;
use crate::models::{Fixture, OddsQuote, RawFixture, Season};
use crate::utils::cache::TtlCache;
use crate::utils::reconcile::{OddsSnapshot, Reconciler};
use crate::utils::teams::TeamDirectory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const ODDS_CACHE_KEY: &str = "odds";

/// Everything one refresh cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleData {
    pub team_code: String,
    pub team_name: String,
    pub season: Season,
    pub fixtures: Vec<Fixture>,
    pub odds_available: bool,
    /// Final games dropped because their data was inconsistent
    pub skipped: usize,
    pub generated_at: DateTime<Utc>,
}

impl ScheduleData {
    pub fn title(&self) -> String {
        format!("{} Complete Schedule {}", self.team_name, self.season.label())
    }
}

/// Which team and which line to track
#[derive(Debug, Clone)]
pub struct TrackingOptions {
    pub team_code: String,
    pub bookmaker: String,
    pub market: String,
    /// Fixed season; derived from today's date when unset
    pub season: Option<Season>,
}

/// Fetches, caches and reconciles schedule and odds data
pub struct ScheduleService {
    options: TrackingOptions,
    directory: Arc<TeamDirectory>,
    odds_feed: Option<Arc<dyn OddsFeed>>,
    schedule_feed: Arc<dyn ScheduleFeed>,
    odds_cache: TtlCache<&'static str, Arc<Vec<OddsQuote>>>,
    schedule_cache: TtlCache<(String, Season), Arc<Vec<RawFixture>>>,
}

impl ScheduleService {
    pub fn new(
        options: TrackingOptions,
        directory: Arc<TeamDirectory>,
        odds_feed: Option<Arc<dyn OddsFeed>>,
        schedule_feed: Arc<dyn ScheduleFeed>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            options,
            directory,
            odds_feed,
            schedule_feed,
            odds_cache: TtlCache::new(cache_ttl, 1),
            schedule_cache: TtlCache::new(cache_ttl, 16),
        }
    }

    pub fn directory(&self) -> &TeamDirectory {
        &self.directory
    }

    pub fn season(&self) -> Season {
        self.options.season.unwrap_or_else(Season::current)
    }

    /// Drop cached provider responses so the next refresh hits the network
    pub fn invalidate(&self) {
        self.odds_cache.invalidate_all();
        self.schedule_cache.invalidate_all();
    }

    /// One fetch-reconcile pass: odds once (soft), schedule (hard), then every fixture
    pub async fn refresh(&self) -> Result<ScheduleData, ScheduleError> {
        let team_code = self.options.team_code.as_str();
        let team_name = self
            .directory
            .full_name(team_code)
            .ok_or_else(|| ScheduleError::UnknownTeam(team_code.to_string()))?
            .to_string();
        let season = self.season();

        let odds = self.load_odds().await;

        let raw_fixtures = self
            .schedule_cache
            .get_or_try_fetch((team_code.to_string(), season), || async {
                tracing::info!("Fetching {} schedule for {}", team_code, season.label());
                self.schedule_feed
                    .fetch_schedule(team_code, season)
                    .await
                    .map(Arc::new)
            })
            .await?;

        let snapshot = match &odds {
            Some(quotes) => OddsSnapshot::Available(quotes.as_slice()),
            None => OddsSnapshot::Unavailable,
        };

        let reconciler = Reconciler::new(
            &self.directory,
            team_code,
            &self.options.bookmaker,
            &self.options.market,
        );

        let mut fixtures = Vec::with_capacity(raw_fixtures.len());
        let mut skipped = 0;
        for raw in raw_fixtures.iter() {
            match reconciler.reconcile(raw, snapshot) {
                Ok(fixture) => fixtures.push(fixture),
                Err(e) => {
                    tracing::warn!("Skipping game: {}", e);
                    skipped += 1;
                }
            }
        }

        Ok(ScheduleData {
            team_code: team_code.to_string(),
            team_name,
            season,
            fixtures,
            odds_available: odds.is_some(),
            skipped,
            generated_at: Utc::now(),
        })
    }

    /// Current odds, or None when the feed is missing or failed
    async fn load_odds(&self) -> Option<Arc<Vec<OddsQuote>>> {
        let Some(feed) = &self.odds_feed else {
            tracing::warn!("No odds API key configured, odds unavailable");
            return None;
        };

        let result = self
            .odds_cache
            .get_or_try_fetch(ODDS_CACHE_KEY, || async {
                tracing::info!("Fetching odds");
                feed.fetch_odds().await.map(Arc::new)
            })
            .await;

        match result {
            Ok(quotes) => Some(quotes),
            Err(e) => {
                tracing::warn!("Odds unavailable: {:#}", e);
                None
            }
        }
    }
}
