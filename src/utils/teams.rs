use std::collections::HashMap;

/// Schedule provider abbreviation -> name used by the odds provider
const NHL_TEAMS: &[(&str, &str)] = &[
    ("ANA", "Anaheim Ducks"),
    ("ARI", "Arizona Coyotes"),
    ("BOS", "Boston Bruins"),
    ("BUF", "Buffalo Sabres"),
    ("CAR", "Carolina Hurricanes"),
    ("CBJ", "Columbus Blue Jackets"),
    ("CGY", "Calgary Flames"),
    ("CHI", "Chicago Blackhawks"),
    ("COL", "Colorado Avalanche"),
    ("DAL", "Dallas Stars"),
    ("DET", "Detroit Red Wings"),
    ("EDM", "Edmonton Oilers"),
    ("FLA", "Florida Panthers"),
    ("LAK", "Los Angeles Kings"),
    ("MIN", "Minnesota Wild"),
    ("MTL", "Montreal Canadiens"),
    ("NJD", "New Jersey Devils"),
    ("NSH", "Nashville Predators"),
    ("NYI", "New York Islanders"),
    ("NYR", "New York Rangers"),
    ("OTT", "Ottawa Senators"),
    ("PHI", "Philadelphia Flyers"),
    ("PIT", "Pittsburgh Penguins"),
    ("SEA", "Seattle Kraken"),
    ("SJS", "San Jose Sharks"),
    ("STL", "St. Louis Blues"),
    ("TBL", "Tampa Bay Lightning"),
    ("TOR", "Toronto Maple Leafs"),
    ("UTA", "Utah Mammoth"),
    ("VAN", "Vancouver Canucks"),
    ("VGK", "Vegas Golden Knights"),
    ("WPG", "Winnipeg Jets"),
    ("WSH", "Washington Capitals"),
];

/// Immutable lookup from short team codes to full display names
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    names: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn nhl() -> Self {
        Self::from_pairs(NHL_TEAMS.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            names: pairs
                .into_iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn full_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Last word of the full name, lowercased ("Chicago Blackhawks" -> "blackhawks")
    pub fn nickname(&self, code: &str) -> Option<String> {
        self.full_name(code)
            .and_then(|name| name.split_whitespace().last())
            .map(str::to_lowercase)
    }
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::nhl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let teams = TeamDirectory::nhl();
        assert_eq!(teams.full_name("CHI"), Some("Chicago Blackhawks"));
        assert_eq!(teams.full_name("STL"), Some("St. Louis Blues"));
        assert_eq!(teams.full_name("XXX"), None);
        assert_eq!(teams.full_name("chi"), None);
    }

    #[test]
    fn test_nickname() {
        let teams = TeamDirectory::nhl();
        assert_eq!(teams.nickname("CHI").as_deref(), Some("blackhawks"));
        assert_eq!(teams.nickname("TOR").as_deref(), Some("leafs"));
        assert_eq!(teams.nickname("XXX"), None);
    }
}
