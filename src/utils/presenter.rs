use crate::models::{Fixture, FixtureStatus, OddsFormat};
use chrono::DateTime;
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;

pub const COLUMNS: [&str; 5] = ["Date", "Start Time", "Opponent", "Result", "Odds"];

const DATE_FORMAT: &str = "%-m/%d/%y";
const TIME_FORMAT: &str = "%I:%M %p";

/// One table row, all cells already formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub date: String,
    pub start_time: String,
    pub opponent: String,
    pub result: String,
    pub odds: String,
}

impl ScheduleRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.start_time.as_str(),
            self.opponent.as_str(),
            self.result.as_str(),
            self.odds.as_str(),
        ]
    }
}

/// Formats fixtures for a fixed display time zone and odds format
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    tz: Tz,
    odds_format: OddsFormat,
}

impl Presenter {
    pub fn new(tz: Tz, odds_format: OddsFormat) -> Self {
        Self { tz, odds_format }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn local_date(&self, start: DateTime<Utc>) -> String {
        start.with_timezone(&self.tz).format(DATE_FORMAT).to_string()
    }

    pub fn local_time(&self, start: DateTime<Utc>) -> String {
        start.with_timezone(&self.tz).format(TIME_FORMAT).to_string()
    }

    pub fn row(&self, fixture: &Fixture) -> ScheduleRow {
        let (result, odds) = match &fixture.status {
            FixtureStatus::Final(score) => (score.to_string(), "N/A".to_string()),
            FixtureStatus::Scheduled(lookup) => {
                ("Scheduled".to_string(), lookup.display(self.odds_format))
            }
        };

        ScheduleRow {
            date: self.local_date(fixture.start_time),
            start_time: self.local_time(fixture.start_time),
            opponent: fixture.opponent_label(),
            result,
            odds,
        }
    }

    pub fn rows(&self, fixtures: &[Fixture]) -> Vec<ScheduleRow> {
        fixtures.iter().map(|f| self.row(f)).collect()
    }
}
