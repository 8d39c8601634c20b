
    use core::fmt;
    use std::fmt::Display;
    use std::str::FromStr;

    use anyhow::{bail, Result};
    use chrono::{Datelike, NaiveDate};

    pub enum GameID {
        ID(String)
    }

    pub enum PlayerID {
        ID(i64)
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Period {
        P(i8)
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum LeagueID {
        NBA,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Season {
        S(String)
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum SeasonType {
        Regular,
        Playoffs,
        PreSeason,
        AllStar,
    }

    pub enum PlayerOrTeam {
        Player,
        Team,
    }

    pub enum ContextMeasure {
        FGA,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StartPeriod(pub Period);
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct EndPeriod(pub Period);

    impl Display for GameID {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                GameID::ID(id) => {
                    write!(f, "GameID={}", id)
                }
            }
        }
    }

    impl Display for PlayerID {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                PlayerID::ID(id) => write!(f, "PlayerID={}", id)
            }
        }
    }

    impl Display for StartPeriod {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self.0 {
                Period::P(period_num) => write!(f, "StartPeriod={}",period_num)
            }

        }
    }

    impl Display for EndPeriod {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self.0 {
                Period::P(period_num) => write!(f, "EndPeriod={}",period_num)
            }

        }
    }

    impl Display for Season {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Season::S(season) => write!(f, "Season={}", season)
            }
        }
    }

    impl Display for SeasonType {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            // the stats service wants the spaces percent-encoded
            let name = match self {
                SeasonType::Regular => "Regular+Season",
                SeasonType::Playoffs => "Playoffs",
                SeasonType::PreSeason => "Pre+Season",
                SeasonType::AllStar => "All+Star",
            };
            write!(f, "SeasonType={}", name)
        }
    }

    impl Display for LeagueID {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                LeagueID::NBA => write!(f, "LeagueID=00")
            }
        }
    }

    impl Display for PlayerOrTeam {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                PlayerOrTeam::Player => write!(f, "PlayerOrTeam=P"),
                PlayerOrTeam::Team => write!(f, "PlayerOrTeam=T"),
            }
        }
    }

    impl Display for ContextMeasure {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                ContextMeasure::FGA => write!(f, "ContextMeasure=FGA")
            }
        }
    }

    impl Season {
        /// Season in progress today, e.g. `2021-22`.
        pub fn current() -> Self {
            Season::containing(chrono::Utc::now().naive_utc().date())
        }

        /// Season a date falls in. A season starts in October.
        pub fn containing(date: NaiveDate) -> Self {
            let first_year = if date.month() >= 10 { date.year() } else { date.year() - 1 };
            Season::S(format!("{}-{:02}", first_year, (first_year + 1) % 100))
        }

        pub fn as_str(&self) -> &str {
            match self {
                Season::S(season) => season
            }
        }
    }

    impl FromStr for Season {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            if s.eq_ignore_ascii_case("current") {
                return Ok(Season::current());
            }
            let bytes = s.as_bytes();
            let well_formed = bytes.len() == 7
                && bytes[4] == b'-'
                && bytes[..4].iter().all(u8::is_ascii_digit)
                && bytes[5..].iter().all(u8::is_ascii_digit);
            if !well_formed {
                bail!("season must look like 2015-16 or be 'current', got {}", s);
            }
            Ok(Season::S(s.to_string()))
        }
    }

    impl FromStr for SeasonType {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_lowercase().as_str() {
                "regular season" | "regular" => Ok(SeasonType::Regular),
                "playoffs" => Ok(SeasonType::Playoffs),
                "pre season" | "preseason" => Ok(SeasonType::PreSeason),
                "all star" | "allstar" => Ok(SeasonType::AllStar),
                other => bail!("unknown season type {}", other),
            }
        }
    }

    impl Default for LeagueID {
        fn default() -> Self { LeagueID::NBA }
    }

    impl Default for Season {
        fn default() -> Self { Season::S("2015-16".to_string()) }
    }

    impl Default for SeasonType {
        fn default() -> Self { SeasonType::Regular }
    }

    impl Default for StartPeriod {
        fn default() -> Self { StartPeriod(Period::P(1)) }
    }

    impl Default for EndPeriod {
        fn default() -> Self { EndPeriod(Period::P(4)) }
    }

    impl Default for PlayerOrTeam {
        fn default() -> Self { PlayerOrTeam::Team }
    }

    impl Default for ContextMeasure {
        fn default() -> Self { ContextMeasure::FGA }
    }
