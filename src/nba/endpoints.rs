
use crate::nba::config::FetchConfig;
use crate::nba::events::{rows_from_result_set, EventRow};
use crate::nba::params::*;
use crate::nba::shots::{locations_from_result_set, ShotLocation};

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;

/// One `{name, headers, rowSet}` table of a stats response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn column_index(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| anyhow!("result set {} has no {} column", self.name, header))
    }

    pub fn str_at(row: &[Value], idx: usize) -> Option<&str> {
        row.get(idx).and_then(Value::as_str)
    }

    pub fn i64_at(row: &[Value], idx: usize) -> Option<i64> {
        let v = row.get(idx)?;
        // some ids come back as floats
        v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
    }
}

/// Pulls every result set out of a stats response. Most endpoints answer
/// with a `resultSets` array; a few use `resultSet`, sometimes holding a
/// single table instead of an array.
pub fn parse_result_sets(endpoint_json: &Value) -> Result<Vec<ResultSet>> {
    let raw = endpoint_json
        .get("resultSets")
        .or_else(|| endpoint_json.get("resultSet"))
        .ok_or_else(|| anyhow!("response has no resultSets"))?;
    let sets: Vec<ResultSet> = match raw {
        Value::Array(_) => serde_json::from_value(raw.clone())?,
        Value::Object(_) => vec![serde_json::from_value(raw.clone())?],
        other => bail!("unexpected resultSets value: {}", other),
    };
    Ok(sets)
}

pub fn find_result_set(endpoint_json: &Value, name: &str) -> Result<ResultSet> {
    parse_result_sets(endpoint_json)?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| anyhow!("response has no {} result set", name))
}

pub struct PlayByPlayV2 {
    pub start_period: StartPeriod,
    pub end_period: EndPeriod,
    pub game_id: GameID,
}

pub struct ShotChartDetail {
    pub league_id: LeagueID,
    pub season: Season,
    pub season_type: SeasonType,
    pub player_id: PlayerID,
    pub context_measure: ContextMeasure,
}

pub struct LeagueGameLog {
    pub league_id: LeagueID,
    pub season: Season,
    pub season_type: SeasonType,
    pub player_or_team: PlayerOrTeam,
}

pub struct CommonAllPlayers {
    pub league_id: LeagueID,
    pub season: Season,
    pub only_current_season: bool,
}

pub trait NBAEndpoint {
    /// Path and query relative to the stats base url.
    fn endpoint_path(&self) -> String;
    /// Name of the result set the scraper reads.
    fn result_set_name(&self) -> &'static str;
}

impl NBAEndpoint for PlayByPlayV2 {
    fn endpoint_path(&self) -> String {
        format!("playbyplayv2?{}&{}&{}", self.game_id, self.start_period, self.end_period)
    }
    fn result_set_name(&self) -> &'static str {
        "PlayByPlay"
    }
}

impl NBAEndpoint for ShotChartDetail {
    fn endpoint_path(&self) -> String {
        format!(
            "shotchartdetail?{}&{}&{}&{}&{}&TeamID=0&GameID=&Outcome=&Location=&Month=0&SeasonSegment=&DateFrom=&DateTo=&OpponentTeamID=0&VsConference=&VsDivision=&Position=&RookieYear=&GameSegment=&Period=0&LastNGames=0",
            self.league_id, self.season, self.season_type, self.player_id, self.context_measure
        )
    }
    fn result_set_name(&self) -> &'static str {
        "Shot_Chart_Detail"
    }
}

impl NBAEndpoint for LeagueGameLog {
    fn endpoint_path(&self) -> String {
        format!(
            "leaguegamelog?{}&{}&{}&{}&Counter=1000&Sorter=PTS&Direction=DESC",
            self.league_id, self.season, self.season_type, self.player_or_team
        )
    }
    fn result_set_name(&self) -> &'static str {
        "LeagueGameLog"
    }
}

impl NBAEndpoint for CommonAllPlayers {
    fn endpoint_path(&self) -> String {
        let only_current = if self.only_current_season { 1 } else { 0 };
        format!(
            "commonallplayers?{}&{}&IsOnlyCurrentSeason={}",
            self.league_id, self.season, only_current
        )
    }
    fn result_set_name(&self) -> &'static str {
        "CommonAllPlayers"
    }
}

/// Blocking client for stats.nba.com. Requests are sent once; failures
/// are handed back to the caller.
pub struct StatsClient {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl StatsClient {
    pub fn new(config: FetchConfig) -> Self {
        StatsClient {
            agent: ureq::AgentBuilder::new().build(),
            config,
        }
    }

    pub fn endpoint_url(&self, endpoint: &dyn NBAEndpoint) -> String {
        format!("{}/{}", self.config.base_url, endpoint.endpoint_path())
    }

    pub fn fetch_nba_json(&self, endpoint_url: &str) -> Result<Value> {
        let request_start = Instant::now();
        let r = self
            .agent
            .get(endpoint_url)
            .set("User-Agent", &self.config.user_agent)
            .set("Accept", "application/json, text/plain, */*")
            .set("Accept-Language", "en-US,en;q=0.5")
            .set("Connection", "keep-alive")
            .set("Referer", &self.config.referer)
            .set("Pragma", "no-cache")
            .set("Cache-Control", "no-cache")
            .call()
            .with_context(|| format!("failed to fetch {}", endpoint_url))?;
        let json: Value = r
            .into_json()
            .with_context(|| format!("invalid json from {}", endpoint_url))?;
        debug!("{} took {:?}", endpoint_url, request_start.elapsed());
        Ok(json)
    }

    pub fn fetch_result_set(&self, endpoint: &dyn NBAEndpoint) -> Result<ResultSet> {
        let endpoint_json = self.fetch_nba_json(&self.endpoint_url(endpoint))?;
        find_result_set(&endpoint_json, endpoint.result_set_name())
    }

    pub fn play_by_play_endpoint(&self, game_id: &str) -> PlayByPlayV2 {
        PlayByPlayV2 {
            start_period: self.config.start_period,
            end_period: self.config.end_period,
            game_id: GameID::ID(game_id.to_string()),
        }
    }

    pub fn shot_chart_endpoint(&self, player_id: i64) -> ShotChartDetail {
        ShotChartDetail {
            league_id: self.config.league_id.clone(),
            season: self.config.season.clone(),
            season_type: self.config.season_type,
            player_id: PlayerID::ID(player_id),
            context_measure: Default::default(),
        }
    }

    pub fn game_log_endpoint(&self) -> LeagueGameLog {
        LeagueGameLog {
            league_id: self.config.league_id.clone(),
            season: self.config.season.clone(),
            season_type: self.config.season_type,
            player_or_team: Default::default(),
        }
    }

    pub fn all_players_endpoint(&self) -> CommonAllPlayers {
        CommonAllPlayers {
            league_id: self.config.league_id.clone(),
            season: self.config.season.clone(),
            only_current_season: self.config.only_current_season,
        }
    }
}

/// Unique GAME_IDs of a game log, first appearance first.
pub fn game_ids_from_result_set(result_set: &ResultSet) -> Result<Vec<String>> {
    let game_col = result_set.column_index("GAME_ID")?;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut game_ids: Vec<String> = Vec::new();
    for row in &result_set.row_set {
        if let Some(id) = ResultSet::str_at(row, game_col) {
            if seen.insert(id) {
                game_ids.push(id.to_string());
            }
        }
    }
    Ok(game_ids)
}

pub fn player_ids_from_result_set(result_set: &ResultSet) -> Result<Vec<i64>> {
    let person_col = result_set.column_index("PERSON_ID")?;
    Ok(result_set
        .row_set
        .iter()
        .filter_map(|row| ResultSet::i64_at(row, person_col))
        .collect())
}

/// Where the scrape pulls its tables from. `StatsClient` is the real
/// implementation; tests plug in canned responses.
pub trait StatsSource {
    fn game_ids(&self) -> Result<Vec<String>>;
    fn player_ids(&self) -> Result<Vec<i64>>;
    fn player_shots(&self, player_id: i64) -> Result<Vec<ShotLocation>>;
    fn play_by_play(&self, game_id: &str) -> Result<Vec<EventRow>>;
}

impl StatsSource for StatsClient {
    fn game_ids(&self) -> Result<Vec<String>> {
        let result_set = self.fetch_result_set(&self.game_log_endpoint())?;
        game_ids_from_result_set(&result_set)
    }

    fn player_ids(&self) -> Result<Vec<i64>> {
        let result_set = self.fetch_result_set(&self.all_players_endpoint())?;
        player_ids_from_result_set(&result_set)
    }

    fn player_shots(&self, player_id: i64) -> Result<Vec<ShotLocation>> {
        let result_set = self.fetch_result_set(&self.shot_chart_endpoint(player_id))?;
        locations_from_result_set(&result_set)
    }

    fn play_by_play(&self, game_id: &str) -> Result<Vec<EventRow>> {
        let result_set = self.fetch_result_set(&self.play_by_play_endpoint(game_id))?;
        rows_from_result_set(&result_set)
    }
}
