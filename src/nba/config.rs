use crate::nba::params::*;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const NBA_BASE_URL: &str = "https://stats.nba.com/stats";
const NBA_REFERER: &str = "https://stats.nba.com/";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:72.0) Gecko/20100101 Firefox/72.0";

/// Everything the stats client needs to build its requests. Built once at
/// startup and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub league_id: LeagueID,
    pub season: Season,
    pub season_type: SeasonType,
    pub start_period: StartPeriod,
    pub end_period: EndPeriod,
    pub only_current_season: bool,
    pub user_agent: String,
    pub referer: String,
}

// On-disk shape, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FetchConfigFile {
    base_url: Option<String>,
    season: Option<String>,
    season_type: Option<String>,
    start_period: Option<i8>,
    end_period: Option<i8>,
    only_current_season: Option<bool>,
    user_agent: Option<String>,
    referer: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: NBA_BASE_URL.to_string(),
            league_id: Default::default(),
            season: Default::default(),
            season_type: Default::default(),
            start_period: Default::default(),
            end_period: Default::default(),
            only_current_season: true,
            user_agent: BROWSER_USER_AGENT.to_string(),
            referer: NBA_REFERER.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn from_json_str(data: &str) -> Result<Self> {
        let file: FetchConfigFile = serde_json::from_str(data).context("invalid fetch config")?;
        let mut config = FetchConfig::default();
        if let Some(url) = file.base_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(season) = file.season {
            config.season = season.parse()?;
        }
        if let Some(season_type) = file.season_type {
            config.season_type = season_type.parse()?;
        }
        if let Some(p) = file.start_period {
            config.start_period = StartPeriod(Period::P(p));
        }
        if let Some(p) = file.end_period {
            config.end_period = EndPeriod(Period::P(p));
        }
        if let Some(only_current) = file.only_current_season {
            config.only_current_season = only_current;
        }
        if let Some(ua) = file.user_agent {
            config.user_agent = ua;
        }
        if let Some(referer) = file.referer {
            config.referer = referer;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&data)
    }

    /// CLI overrides are applied by value so the result stays immutable.
    pub fn with_season(self, season: Season) -> Self {
        FetchConfig { season, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_2015_16_scrape() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://stats.nba.com/stats");
        assert_eq!(config.season.as_str(), "2015-16");
        assert_eq!(config.season_type, SeasonType::Regular);
        assert_eq!(config.start_period, StartPeriod(Period::P(1)));
        assert_eq!(config.end_period, EndPeriod(Period::P(4)));
    }

    #[test]
    fn file_values_override_defaults() {
        let config = FetchConfig::from_json_str(
            r#"{"base_url": "http://localhost:8080/stats/", "season": "2016-17", "season_type": "Playoffs", "end_period": 5}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/stats");
        assert_eq!(config.season.as_str(), "2016-17");
        assert_eq!(config.season_type, SeasonType::Playoffs);
        assert_eq!(config.end_period, EndPeriod(Period::P(5)));
        assert_eq!(config.start_period, StartPeriod(Period::P(1)));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_seasons() {
        assert!(FetchConfig::from_json_str(r#"{"sesaon": "2016-17"}"#).is_err());
        assert!(FetchConfig::from_json_str(r#"{"season": "16-17"}"#).is_err());
    }

    #[test]
    fn season_override_keeps_other_fields() {
        let config = FetchConfig::default().with_season(Season::S("2017-18".to_string()));
        assert_eq!(config.season.as_str(), "2017-18");
        assert_eq!(config.base_url, NBA_BASE_URL);
    }
}
