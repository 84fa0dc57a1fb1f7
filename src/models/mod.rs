use crate::errors::ConfigError;
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A season spans two calendar years and is identified by both, e.g. `20252026`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The season whose first year is the year of `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year())
    }

    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    /// Provider identifier, e.g. "20252026"
    pub fn id(&self) -> String {
        format!("{}{}", self.start_year, self.end_year())
    }

    /// Human-readable form, e.g. "2025-2026"
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Season {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidSeason(s.to_string());

        if s.len() != 8 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let start: i32 = s[..4].parse().map_err(|_| invalid())?;
        let end: i32 = s[4..].parse().map_err(|_| invalid())?;
        if end != start + 1 {
            return Err(invalid());
        }

        Ok(Self::new(start))
    }
}

/// Whether a game has been played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Scheduled,
    Final,
}

impl GameState {
    /// Map the schedule provider's state flag. "OFF" is the official final.
    pub fn from_provider(state: &str) -> Self {
        match state {
            "FINAL" | "OFF" => GameState::Final,
            _ => GameState::Scheduled,
        }
    }
}

/// One team entry in a schedule provider game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSide {
    pub abbrev: String,
    #[serde(default)]
    pub score: Option<u32>,
}

/// A game as the schedule provider returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFixture {
    pub id: i64,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: DateTime<Utc>,
    pub game_state: String,
    pub home_team: TeamSide,
    pub away_team: TeamSide,
}

impl RawFixture {
    pub fn state(&self) -> GameState {
        GameState::from_provider(&self.game_state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

/// Final score from the tracked team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub own: u32,
    pub opponent: u32,
}

impl FinalScore {
    pub fn outcome(&self) -> Outcome {
        if self.own > self.opponent {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.own, self.opponent, self.outcome())
    }
}

/// Price format requested from the odds provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OddsFormat {
    #[default]
    American,
    Decimal,
}

impl OddsFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            OddsFormat::American => "american",
            OddsFormat::Decimal => "decimal",
        }
    }

    pub fn format_price(&self, price: f64) -> String {
        match self {
            OddsFormat::American => format!("{:+}", price.round() as i32),
            OddsFormat::Decimal => format!("{:.2}", price),
        }
    }
}

impl FromStr for OddsFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "american" => Ok(OddsFormat::American),
            "decimal" => Ok(OddsFormat::Decimal),
            other => Err(ConfigError::InvalidOddsFormat(other.to_string())),
        }
    }
}

/// Price for one side of a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomePrice {
    pub name: String,
    pub price: f64,
}

/// One market (h2h, spreads, totals...) offered by a bookmaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketLine {
    pub key: String,
    pub outcomes: Vec<OutcomePrice>,
}

impl MarketLine {
    pub fn price_for(&self, team: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.name == team)
            .map(|outcome| outcome.price)
    }
}

/// Lines published by a single bookmaker for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmakerLine {
    pub key: String,
    pub title: String,
    pub last_update: DateTime<Utc>,
    pub markets: Vec<MarketLine>,
}

impl BookmakerLine {
    pub fn market(&self, key: &str) -> Option<&MarketLine> {
        self.markets.iter().find(|m| m.key == key)
    }
}

/// An upcoming game with betting lines, keyed by full team names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsQuote {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub bookmakers: Vec<BookmakerLine>,
}

impl OddsQuote {
    /// True when the quote is for these two teams, in either order
    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        (self.home_team == team_a && self.away_team == team_b)
            || (self.home_team == team_b && self.away_team == team_a)
    }

    pub fn bookmaker(&self, key: &str) -> Option<&BookmakerLine> {
        self.bookmakers.iter().find(|b| b.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPrice {
    pub team: String,
    pub price: f64,
}

/// Moneyline for both sides, home first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneylinePair {
    pub home: TeamPrice,
    pub away: TeamPrice,
}

/// Result of looking up odds for a scheduled game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OddsLookup {
    Found(MoneylinePair),
    /// No quote or no bookmaker line for the game, or a team code we can't name
    NotFound,
    /// Game and bookmaker located but a side's price is missing
    Incomplete,
    /// The odds feed itself could not be fetched this cycle
    Unavailable,
}

impl OddsLookup {
    pub fn display(&self, format: OddsFormat) -> String {
        match self {
            OddsLookup::Found(pair) => format!(
                "{}: {} | {}: {}",
                pair.home.team,
                format.format_price(pair.home.price),
                pair.away.team,
                format.format_price(pair.away.price)
            ),
            OddsLookup::NotFound | OddsLookup::Unavailable => "N/A".to_string(),
            OddsLookup::Incomplete => "Odds not available".to_string(),
        }
    }
}

/// Either a final score or the odds for a game still to be played, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FixtureStatus {
    Final(FinalScore),
    Scheduled(OddsLookup),
}

/// One game involving the tracked team, after reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub game_id: i64,
    pub start_time: DateTime<Utc>,
    pub opponent_code: String,
    pub is_home: bool,
    pub status: FixtureStatus,
}

impl Fixture {
    pub fn state(&self) -> GameState {
        match self.status {
            FixtureStatus::Final(_) => GameState::Final,
            FixtureStatus::Scheduled(_) => GameState::Scheduled,
        }
    }

    pub fn score(&self) -> Option<&FinalScore> {
        match &self.status {
            FixtureStatus::Final(score) => Some(score),
            FixtureStatus::Scheduled(_) => None,
        }
    }

    pub fn odds(&self) -> Option<&OddsLookup> {
        match &self.status {
            FixtureStatus::Scheduled(odds) => Some(odds),
            FixtureStatus::Final(_) => None,
        }
    }

    /// "vs. X" at home, "@ X" on the road
    pub fn opponent_label(&self) -> String {
        if self.is_home {
            format!("vs. {}", self.opponent_code)
        } else {
            format!("@ {}", self.opponent_code)
        }
    }
}
