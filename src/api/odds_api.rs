use crate::api::OddsFeed;
use crate::models::{BookmakerLine, MarketLine, OddsFormat, OddsQuote, OutcomePrice};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Deserialize;

pub const ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";

/// Response from The Odds API for a single game
#[derive(Debug, Deserialize)]
struct OddsApiGame {
    id: String,
    commence_time: DateTime<Utc>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<OddsApiBookmaker>,
}

/// Bookmaker data from The Odds API
#[derive(Debug, Deserialize)]
struct OddsApiBookmaker {
    key: String,
    title: String,
    last_update: DateTime<Utc>,
    #[serde(default)]
    markets: Vec<OddsApiMarket>,
}

/// Market data (e.g., moneyline, spread) from The Odds API
#[derive(Debug, Deserialize)]
struct OddsApiMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<OddsApiOutcome>,
}

/// Outcome data for a specific team
#[derive(Debug, Deserialize)]
struct OddsApiOutcome {
    name: String,
    price: f64,
}

impl From<OddsApiGame> for OddsQuote {
    fn from(game: OddsApiGame) -> Self {
        Self {
            id: game.id,
            home_team: game.home_team,
            away_team: game.away_team,
            commence_time: game.commence_time,
            bookmakers: game
                .bookmakers
                .into_iter()
                .map(|bookmaker| BookmakerLine {
                    key: bookmaker.key,
                    title: bookmaker.title,
                    last_update: bookmaker.last_update,
                    markets: bookmaker
                        .markets
                        .into_iter()
                        .map(|market| MarketLine {
                            key: market.key,
                            outcomes: market
                                .outcomes
                                .into_iter()
                                .map(|outcome| OutcomePrice {
                                    name: outcome.name,
                                    price: outcome.price,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Request quota reported by The Odds API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiUsage {
    pub remaining: Option<u32>,
    pub used: Option<u32>,
}

impl ApiUsage {
    fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<f64>().ok())
                .map(|value| value as u32)
        };

        Self {
            remaining: read("x-requests-remaining"),
            used: read("x-requests-used"),
        }
    }
}

pub struct OddsApiClient {
    api_key: String,
    base_url: String,
    sport_key: String,
    regions: String,
    market: String,
    odds_format: OddsFormat,
    client: reqwest::Client,
}

impl OddsApiClient {
    pub fn new(api_key: String, sport_key: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: ODDS_API_BASE_URL.to_string(),
            sport_key: sport_key.into(),
            regions: "us".to_string(),
            market: "h2h".to_string(),
            odds_format: OddsFormat::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_regions(mut self, regions: impl Into<String>) -> Self {
        self.regions = regions.into();
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_odds_format(mut self, odds_format: OddsFormat) -> Self {
        self.odds_format = odds_format;
        self
    }

    /// Fetch all upcoming games with odds for the configured sport
    pub async fn fetch_games(&self) -> Result<Vec<OddsQuote>> {
        let url = format!("{}/sports/{}/odds", self.base_url, self.sport_key);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", self.regions.as_str()),
                ("markets", self.market.as_str()),
                ("oddsFormat", self.odds_format.as_query()),
            ])
            .send()
            .await
            .context("Failed to fetch odds from The Odds API")?;

        if !response.status().is_success() {
            anyhow::bail!("Odds API returned error: {}", response.status());
        }

        let usage = ApiUsage::from_headers(response.headers());
        tracing::debug!(
            remaining = ?usage.remaining,
            used = ?usage.used,
            "Odds API quota"
        );

        let api_games: Vec<OddsApiGame> = response
            .json()
            .await
            .context("Failed to parse Odds API response")?;

        tracing::info!("Fetched odds for {} games", api_games.len());

        Ok(api_games.into_iter().map(OddsQuote::from).collect())
    }

    /// Check how many API requests you have remaining
    pub async fn check_usage(&self) -> Result<ApiUsage> {
        let url = format!("{}/sports", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to reach The Odds API")?;

        if !response.status().is_success() {
            anyhow::bail!("Odds API returned error: {}", response.status());
        }

        Ok(ApiUsage::from_headers(response.headers()))
    }
}

#[async_trait]
impl OddsFeed for OddsApiClient {
    async fn fetch_odds(&self) -> Result<Vec<OddsQuote>> {
        self.fetch_games().await
    }
}
