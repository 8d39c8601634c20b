use crate::nba::endpoints::ResultSet;

use anyhow::{Context, Result};

/// EVENTMSGTYPE codes the classifier cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMsgType {
    MadeShot,
    MissedShot,
    FreeThrow,
    Other(i64),
}

impl From<i64> for EventMsgType {
    fn from(code: i64) -> Self {
        match code {
            1 => EventMsgType::MadeShot,
            2 => EventMsgType::MissedShot,
            3 => EventMsgType::FreeThrow,
            other => EventMsgType::Other(other),
        }
    }
}

impl EventMsgType {
    pub fn is_shooting_event(&self) -> bool {
        !matches!(self, EventMsgType::Other(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Visitor,
}

/// One play-by-play entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub game_id: String,
    pub event_num: i64,
    pub msg_type: EventMsgType,
    pub home_description: Option<String>,
    pub visitor_description: Option<String>,
    /// Signed next-possession value, only ever written on missed shots.
    pub next: i32,
}

impl EventRow {
    pub fn new(
        game_id: &str,
        event_num: i64,
        msg_type: EventMsgType,
        home_description: Option<&str>,
        visitor_description: Option<&str>,
    ) -> Self {
        EventRow {
            game_id: game_id.to_string(),
            event_num,
            msg_type,
            home_description: home_description.map(str::to_string),
            visitor_description: visitor_description.map(str::to_string),
            next: 0,
        }
    }

    /// Side credited with the event: home when the home description is
    /// filled in, visitor otherwise.
    pub fn acting_side(&self) -> Side {
        match self.home_description.as_deref() {
            Some(desc) if !desc.is_empty() => Side::Home,
            _ => Side::Visitor,
        }
    }

    /// Side that took a missed shot.
    pub fn missing_side(&self) -> Side {
        match self.home_description.as_deref() {
            Some(desc) if desc.contains("MISS") => Side::Home,
            _ => Side::Visitor,
        }
    }

    pub fn description(&self, side: Side) -> &str {
        let desc = match side {
            Side::Home => self.home_description.as_deref(),
            Side::Visitor => self.visitor_description.as_deref(),
        };
        desc.unwrap_or("")
    }
}

/// Reads the `PlayByPlay` result set into rows, keeping every event type.
pub fn rows_from_result_set(result_set: &ResultSet) -> Result<Vec<EventRow>> {
    let game_col = result_set.column_index("GAME_ID")?;
    let event_col = result_set.column_index("EVENTNUM")?;
    let type_col = result_set.column_index("EVENTMSGTYPE")?;
    let home_col = result_set.column_index("HOMEDESCRIPTION")?;
    let visitor_col = result_set.column_index("VISITORDESCRIPTION")?;

    let mut rows = Vec::with_capacity(result_set.row_set.len());
    for (pos, row) in result_set.row_set.iter().enumerate() {
        let game_id = ResultSet::str_at(row, game_col)
            .with_context(|| format!("play-by-play row {} has no GAME_ID", pos))?;
        let event_num = ResultSet::i64_at(row, event_col)
            .with_context(|| format!("play-by-play row {} has no EVENTNUM", pos))?;
        let msg_type = ResultSet::i64_at(row, type_col)
            .with_context(|| format!("play-by-play row {} has no EVENTMSGTYPE", pos))?;
        rows.push(EventRow::new(
            game_id,
            event_num,
            EventMsgType::from(msg_type),
            ResultSet::str_at(row, home_col),
            ResultSet::str_at(row, visitor_col),
        ));
    }
    Ok(rows)
}

/// Drops everything but made shots, missed shots and free throws,
/// keeping event order.
pub fn shooting_events(rows: Vec<EventRow>) -> Vec<EventRow> {
    rows.into_iter().filter(|r| r.msg_type.is_shooting_event()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sides_follow_the_description_columns() {
        let home_miss = EventRow::new("g", 1, EventMsgType::MissedShot, Some("MISS Curry 26' 3PT Jump Shot"), None);
        assert_eq!(home_miss.missing_side(), Side::Home);
        assert_eq!(home_miss.acting_side(), Side::Home);

        let away_miss = EventRow::new("g", 2, EventMsgType::MissedShot, Some("Green BLOCK (1 BLK)"), Some("MISS Davis 2' Layup"));
        assert_eq!(away_miss.missing_side(), Side::Visitor);
        assert_eq!(away_miss.acting_side(), Side::Home);

        let empty_home = EventRow::new("g", 3, EventMsgType::MadeShot, Some(""), Some("Davis 2' Layup (2 PTS)"));
        assert_eq!(empty_home.acting_side(), Side::Visitor);
        assert_eq!(empty_home.description(Side::Home), "");
    }

    #[test]
    fn reads_play_by_play_rows() {
        let result_set: ResultSet = serde_json::from_value(json!({
            "name": "PlayByPlay",
            "headers": ["GAME_ID", "EVENTNUM", "EVENTMSGTYPE", "EVENTMSGACTIONTYPE", "HOMEDESCRIPTION", "VISITORDESCRIPTION"],
            "rowSet": [
                ["0021500001", 2, 12, 0, null, null],
                ["0021500001", 4, 2, 1, "MISS Horford 12' Jump Shot", null],
                ["0021500001", 7, 1, 1, null, "Teague 3PT Jump Shot (3 PTS)"]
            ]
        }))
        .unwrap();
        let rows = rows_from_result_set(&result_set).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].msg_type, EventMsgType::Other(12));
        assert_eq!(rows[1].msg_type, EventMsgType::MissedShot);
        assert_eq!(rows[2].visitor_description.as_deref(), Some("Teague 3PT Jump Shot (3 PTS)"));

        let shots = shooting_events(rows);
        assert_eq!(shots.iter().map(|r| r.event_num).collect::<Vec<_>>(), vec![4, 7]);
        assert!(shots.iter().all(|r| r.next == 0));
    }

    #[test]
    fn missing_column_is_an_error() {
        let result_set: ResultSet = serde_json::from_value(json!({
            "name": "PlayByPlay",
            "headers": ["GAME_ID", "EVENTNUM"],
            "rowSet": []
        }))
        .unwrap();
        assert!(rows_from_result_set(&result_set).is_err());
    }
}
