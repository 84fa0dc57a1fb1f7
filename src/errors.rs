use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// Failure talking to the schedule provider
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned error: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A final game whose data can't be turned into a result
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("game {game_id} is final but tied {score}-{score}")]
    TiedFinal { game_id: i64, score: u32 },

    #[error("game {game_id} is final but has no score")]
    MissingScore { game_id: i64 },
}

/// Failure of a whole refresh cycle
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unknown team code: {0}")]
    UnknownTeam(String),

    #[error("failed to fetch schedule: {0}")]
    Fetch(#[from] Arc<FetchError>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid season {0:?}, expected e.g. 20252026")]
    InvalidSeason(String),

    #[error("invalid odds format {0:?}, expected american or decimal")]
    InvalidOddsFormat(String),

    #[error("invalid time zone {0:?}")]
    InvalidTimeZone(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
