use crate::api::odds_api::ODDS_API_BASE_URL;
use crate::api::schedule_api::NHL_API_BASE_URL;
use crate::errors::ConfigError;
use crate::models::{OddsFormat, Season};
use chrono_tz::Tz;
use std::time::Duration;

const DEFAULT_TEAM: &str = "CHI";
const DEFAULT_BOOKMAKER: &str = "draftkings";
const DEFAULT_MARKET: &str = "h2h";
const DEFAULT_SPORT_KEY: &str = "icehockey_nhl";
const DEFAULT_REGIONS: &str = "us";
const DEFAULT_TZ: Tz = chrono_tz::America::Chicago;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub odds_api_key: Option<String>,
    pub team_code: String,
    pub bookmaker: String,
    pub market: String,
    pub sport_key: String,
    pub regions: String,
    pub odds_format: OddsFormat,
    pub display_tz: Tz,
    pub cache_ttl: Duration,
    /// Fixed season; derived from today's date when unset
    pub season: Option<Season>,
    pub bind_addr: String,
    pub odds_api_base_url: String,
    pub schedule_api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let odds_format = match get("ODDS_FORMAT") {
            Some(v) => v.parse()?,
            None => OddsFormat::default(),
        };

        let display_tz = match get("DISPLAY_TZ") {
            Some(v) => v
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimeZone(v.clone()))?,
            None => DEFAULT_TZ,
        };

        let cache_ttl = match get("CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "CACHE_TTL_SECS",
                    value: v.clone(),
                }
            })?),
            None => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        };

        let season = get("SEASON").map(|v| v.parse::<Season>()).transpose()?;

        Ok(Self {
            odds_api_key: get("ODDS_API_KEY"),
            team_code: or("TEAM", DEFAULT_TEAM).trim().to_ascii_uppercase(),
            bookmaker: or("BOOKMAKER", DEFAULT_BOOKMAKER),
            market: or("ODDS_MARKET", DEFAULT_MARKET),
            sport_key: or("SPORT_KEY", DEFAULT_SPORT_KEY),
            regions: or("ODDS_REGIONS", DEFAULT_REGIONS),
            odds_format,
            display_tz,
            cache_ttl,
            season,
            bind_addr: or("BIND_ADDR", DEFAULT_BIND_ADDR),
            odds_api_base_url: or("ODDS_API_BASE_URL", ODDS_API_BASE_URL),
            schedule_api_base_url: or("SCHEDULE_API_BASE_URL", NHL_API_BASE_URL),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odds_api_key: None,
            team_code: DEFAULT_TEAM.to_string(),
            bookmaker: DEFAULT_BOOKMAKER.to_string(),
            market: DEFAULT_MARKET.to_string(),
            sport_key: DEFAULT_SPORT_KEY.to_string(),
            regions: DEFAULT_REGIONS.to_string(),
            odds_format: OddsFormat::default(),
            display_tz: DEFAULT_TZ,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            season: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            odds_api_base_url: ODDS_API_BASE_URL.to_string(),
            schedule_api_base_url: NHL_API_BASE_URL.to_string(),
        }
    }
}
