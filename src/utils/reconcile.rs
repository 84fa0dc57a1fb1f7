use crate::errors::ReconcileError;
use crate::models::{
    FinalScore, Fixture, FixtureStatus, GameState, MoneylinePair, OddsLookup, OddsQuote,
    RawFixture, TeamPrice,
};
use crate::utils::teams::TeamDirectory;
use chrono::{DateTime, Utc};

/// Odds as seen by one refresh cycle
#[derive(Debug, Clone, Copy)]
pub enum OddsSnapshot<'a> {
    Available(&'a [OddsQuote]),
    Unavailable,
}

/// Turns raw schedule entries into fixtures for the tracked team
pub struct Reconciler<'a> {
    directory: &'a TeamDirectory,
    team_code: &'a str,
    bookmaker: &'a str,
    market: &'a str,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        directory: &'a TeamDirectory,
        team_code: &'a str,
        bookmaker: &'a str,
        market: &'a str,
    ) -> Self {
        Self {
            directory,
            team_code,
            bookmaker,
            market,
        }
    }

    pub fn reconcile(
        &self,
        raw: &RawFixture,
        odds: OddsSnapshot<'_>,
    ) -> Result<Fixture, ReconcileError> {
        let is_home = raw.home_team.abbrev == self.team_code;
        let (own, opponent) = if is_home {
            (&raw.home_team, &raw.away_team)
        } else {
            (&raw.away_team, &raw.home_team)
        };

        let status = match raw.state() {
            GameState::Final => {
                let (Some(own_score), Some(opponent_score)) = (own.score, opponent.score) else {
                    return Err(ReconcileError::MissingScore { game_id: raw.id });
                };
                if own_score == opponent_score {
                    return Err(ReconcileError::TiedFinal {
                        game_id: raw.id,
                        score: own_score,
                    });
                }
                FixtureStatus::Final(FinalScore {
                    own: own_score,
                    opponent: opponent_score,
                })
            }
            GameState::Scheduled => FixtureStatus::Scheduled(match odds {
                OddsSnapshot::Available(quotes) => {
                    self.find_game_odds(
                        quotes,
                        &raw.home_team.abbrev,
                        &raw.away_team.abbrev,
                        raw.start_time_utc,
                    )
                }
                OddsSnapshot::Unavailable => OddsLookup::Unavailable,
            }),
        };

        Ok(Fixture {
            game_id: raw.id,
            start_time: raw.start_time_utc,
            opponent_code: opponent.abbrev.clone(),
            is_home,
            status,
        })
    }

    /// Find the configured bookmaker's moneyline for a game, matching team names in either order.
    ///
    /// When the pair meets more than once in the feed, the quote starting closest to `start_time` wins.
    pub fn find_game_odds(
        &self,
        quotes: &[OddsQuote],
        home_code: &str,
        away_code: &str,
        start_time: DateTime<Utc>,
    ) -> OddsLookup {
        let (Some(home_name), Some(away_name)) = (
            self.directory.full_name(home_code),
            self.directory.full_name(away_code),
        ) else {
            return OddsLookup::NotFound;
        };

        let Some(line) = quotes
            .iter()
            .filter(|quote| quote.is_between(home_name, away_name))
            .filter_map(|quote| {
                quote
                    .bookmaker(self.bookmaker)
                    .map(|line| ((quote.commence_time - start_time).num_seconds().abs(), line))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, line)| line)
        else {
            return OddsLookup::NotFound;
        };

        let Some(market) = line.market(self.market) else {
            return OddsLookup::NotFound;
        };

        match (market.price_for(home_name), market.price_for(away_name)) {
            (Some(home_price), Some(away_price)) => OddsLookup::Found(MoneylinePair {
                home: TeamPrice {
                    team: home_name.to_string(),
                    price: home_price,
                },
                away: TeamPrice {
                    team: away_name.to_string(),
                    price: away_price,
                },
            }),
            _ => OddsLookup::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookmakerLine, MarketLine, OutcomePrice, TeamSide};
    use chrono::{TimeZone, Utc};

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 9, 0, 0, 0).unwrap()
    }

    fn raw(id: i64, state: &str, home: (&str, Option<u32>), away: (&str, Option<u32>)) -> RawFixture {
        RawFixture {
            id,
            start_time_utc: kickoff(),
            game_state: state.to_string(),
            home_team: TeamSide {
                abbrev: home.0.to_string(),
                score: home.1,
            },
            away_team: TeamSide {
                abbrev: away.0.to_string(),
                score: away.1,
            },
        }
    }

    fn quote(home: &str, away: &str, bookmaker: &str, prices: &[(&str, f64)]) -> OddsQuote {
        OddsQuote {
            id: format!("{}-{}", home, away),
            home_team: home.to_string(),
            away_team: away.to_string(),
            commence_time: kickoff(),
            bookmakers: vec![BookmakerLine {
                key: bookmaker.to_string(),
                title: bookmaker.to_string(),
                last_update: Utc.with_ymd_and_hms(2025, 10, 8, 12, 0, 0).unwrap(),
                markets: vec![
                    MarketLine {
                        key: "spreads".to_string(),
                        outcomes: vec![OutcomePrice {
                            name: home.to_string(),
                            price: -999.0,
                        }],
                    },
                    MarketLine {
                        key: "h2h".to_string(),
                        outcomes: prices
                            .iter()
                            .map(|(name, price)| OutcomePrice {
                                name: name.to_string(),
                                price: *price,
                            })
                            .collect(),
                    },
                ],
            }],
        }
    }

    fn found(home: &str, home_price: f64, away: &str, away_price: f64) -> OddsLookup {
        OddsLookup::Found(MoneylinePair {
            home: TeamPrice {
                team: home.to_string(),
                price: home_price,
            },
            away: TeamPrice {
                team: away.to_string(),
                price: away_price,
            },
        })
    }

    #[test]
    fn test_final_home_win() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");

        let fixture = reconciler
            .reconcile(
                &raw(1, "FINAL", ("CHI", Some(4)), ("DAL", Some(2))),
                OddsSnapshot::Unavailable,
            )
            .unwrap();

        assert_eq!(fixture.state(), GameState::Final);
        assert!(fixture.odds().is_none());
        assert_eq!(fixture.score().unwrap().to_string(), "4-2 (Win)");
        assert_eq!(fixture.opponent_label(), "vs. DAL");
    }

    #[test]
    fn test_final_away_loss_is_from_tracked_team_view() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");

        let fixture = reconciler
            .reconcile(
                &raw(2, "OFF", ("BOS", Some(5)), ("CHI", Some(1))),
                OddsSnapshot::Unavailable,
            )
            .unwrap();

        assert_eq!(fixture.score().unwrap().to_string(), "1-5 (Loss)");
        assert_eq!(fixture.opponent_label(), "@ BOS");
    }

    #[test]
    fn test_final_tie_and_missing_score_are_errors() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");

        let tie = reconciler.reconcile(
            &raw(3, "FINAL", ("CHI", Some(2)), ("DAL", Some(2))),
            OddsSnapshot::Unavailable,
        );
        assert_eq!(tie, Err(ReconcileError::TiedFinal { game_id: 3, score: 2 }));

        let missing = reconciler.reconcile(
            &raw(4, "FINAL", ("CHI", None), ("DAL", Some(2))),
            OddsSnapshot::Unavailable,
        );
        assert_eq!(missing, Err(ReconcileError::MissingScore { game_id: 4 }));
    }

    #[test]
    fn test_final_ignores_available_odds() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        )];

        let fixture = reconciler
            .reconcile(
                &raw(5, "FINAL", ("CHI", Some(3)), ("DAL", Some(1))),
                OddsSnapshot::Available(&quotes),
            )
            .unwrap();
        assert!(fixture.odds().is_none());
        assert!(fixture.score().is_some());
    }

    #[test]
    fn test_scheduled_match_is_symmetric() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let prices = [("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)];
        let same_order = vec![quote("Chicago Blackhawks", "Dallas Stars", "draftkings", &prices)];
        let swapped = vec![quote("Dallas Stars", "Chicago Blackhawks", "draftkings", &prices)];
        let game = raw(6, "FUT", ("CHI", None), ("DAL", None));

        let a = reconciler
            .reconcile(&game, OddsSnapshot::Available(&same_order))
            .unwrap();
        let b = reconciler
            .reconcile(&game, OddsSnapshot::Available(&swapped))
            .unwrap();

        let expected = found("Chicago Blackhawks", 120.0, "Dallas Stars", -140.0);
        assert_eq!(a.odds(), Some(&expected));
        assert_eq!(b.odds(), Some(&expected));
        assert!(a.score().is_none());
    }

    #[test]
    fn test_home_side_listed_first() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        )];

        let lookup = reconciler.find_game_odds(&quotes, "DAL", "CHI", kickoff());
        assert_eq!(lookup, found("Dallas Stars", -140.0, "Chicago Blackhawks", 120.0));
    }

    #[test]
    fn test_no_matching_quote_is_not_found() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Boston Bruins",
            "Toronto Maple Leafs",
            "draftkings",
            &[("Boston Bruins", 110.0), ("Toronto Maple Leafs", -130.0)],
        )];

        let fixture = reconciler
            .reconcile(
                &raw(7, "FUT", ("CHI", None), ("DAL", None)),
                OddsSnapshot::Available(&quotes),
            )
            .unwrap();
        assert_eq!(fixture.odds(), Some(&OddsLookup::NotFound));
    }

    #[test]
    fn test_other_bookmaker_only_is_not_found() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "fanduel",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        )];

        assert_eq!(
            reconciler.find_game_odds(&quotes, "CHI", "DAL", kickoff()),
            OddsLookup::NotFound
        );
    }

    #[test]
    fn test_missing_price_is_incomplete() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0)],
        )];

        assert_eq!(
            reconciler.find_game_odds(&quotes, "CHI", "DAL", kickoff()),
            OddsLookup::Incomplete
        );
    }

    #[test]
    fn test_unmapped_team_only_affects_its_fixture() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let quotes = vec![quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        )];
        let games = vec![
            raw(8, "FUT", ("XYZ", None), ("CHI", None)),
            raw(9, "FUT", ("CHI", None), ("DAL", None)),
        ];

        let fixtures: Vec<Fixture> = games
            .iter()
            .map(|g| reconciler.reconcile(g, OddsSnapshot::Available(&quotes)).unwrap())
            .collect();

        assert_eq!(fixtures[0].odds(), Some(&OddsLookup::NotFound));
        assert_eq!(fixtures[0].opponent_label(), "@ XYZ");
        assert_eq!(
            fixtures[1].odds(),
            Some(&found("Chicago Blackhawks", 120.0, "Dallas Stars", -140.0))
        );
    }

    #[test]
    fn test_missing_market_is_not_found() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let mut spreads_only = quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        );
        spreads_only.bookmakers[0].markets.retain(|m| m.key != "h2h");

        assert_eq!(
            reconciler.find_game_odds(&[spreads_only], "CHI", "DAL", kickoff()),
            OddsLookup::NotFound
        );
    }

    #[test]
    fn test_home_and_home_picks_nearest_start() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");
        let mut first = quote(
            "Chicago Blackhawks",
            "Dallas Stars",
            "draftkings",
            &[("Chicago Blackhawks", 120.0), ("Dallas Stars", -140.0)],
        );
        first.commence_time = Utc.with_ymd_and_hms(2025, 10, 11, 0, 0, 0).unwrap();
        let mut second = quote(
            "Dallas Stars",
            "Chicago Blackhawks",
            "draftkings",
            &[("Dallas Stars", -200.0), ("Chicago Blackhawks", 170.0)],
        );
        second.commence_time = Utc.with_ymd_and_hms(2025, 10, 13, 0, 30, 0).unwrap();
        let quotes = vec![first, second];

        let mut rematch = raw(11, "FUT", ("DAL", None), ("CHI", None));
        rematch.start_time_utc = Utc.with_ymd_and_hms(2025, 10, 13, 0, 30, 0).unwrap();
        let fixture = reconciler
            .reconcile(&rematch, OddsSnapshot::Available(&quotes))
            .unwrap();
        assert_eq!(
            fixture.odds(),
            Some(&found("Dallas Stars", -200.0, "Chicago Blackhawks", 170.0))
        );

        let opener = reconciler.find_game_odds(
            &quotes,
            "CHI",
            "DAL",
            Utc.with_ymd_and_hms(2025, 10, 11, 0, 0, 0).unwrap(),
        );
        assert_eq!(opener, found("Chicago Blackhawks", 120.0, "Dallas Stars", -140.0));
    }

    #[test]
    fn test_unavailable_feed() {
        let teams = TeamDirectory::nhl();
        let reconciler = Reconciler::new(&teams, "CHI", "draftkings", "h2h");

        let fixture = reconciler
            .reconcile(&raw(10, "PRE", ("CHI", None), ("DAL", None)), OddsSnapshot::Unavailable)
            .unwrap();
        assert_eq!(fixture.odds(), Some(&OddsLookup::Unavailable));
    }
}
