use crate::nba::events::{EventMsgType, EventRow};
use crate::nba::shots::ShotLocation;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// A missed shot's location and the value of the possession that followed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissOutcome {
    pub loc_x: i64,
    pub loc_y: i64,
    pub shot_distance: i64,
    pub next: i32,
}

/// Inner join of one game's classified rows with that game's miss
/// locations on event number, kept to missed shots. Output follows
/// play-by-play order; misses without a location are dropped.
pub fn join_miss_locations(rows: &[EventRow], locations: &[ShotLocation]) -> Vec<MissOutcome> {
    let mut by_event: HashMap<i64, Vec<&ShotLocation>> = HashMap::new();
    for loc in locations {
        by_event.entry(loc.game_event_id).or_insert_with(Vec::new).push(loc);
    }

    let mut outcomes = Vec::new();
    for row in rows.iter().filter(|r| r.msg_type == EventMsgType::MissedShot) {
        if let Some(matches) = by_event.get(&row.event_num) {
            outcomes.extend(matches.iter().map(|loc| MissOutcome {
                loc_x: loc.loc_x,
                loc_y: loc.loc_y,
                shot_distance: loc.shot_distance,
                next: row.next,
            }));
        }
    }
    outcomes
}

/// Per-game outcomes collected across a whole scrape. Row position is the
/// table's index.
#[derive(Debug, Default)]
pub struct MissLocationTable {
    games: Vec<Vec<MissOutcome>>,
}

impl MissLocationTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_game(&mut self, outcomes: Vec<MissOutcome>) {
        self.games.push(outcomes);
    }

    pub fn games(&self) -> usize {
        self.games.len()
    }

    /// Flattens the games into one sequentially indexed list.
    pub fn into_records(self) -> Vec<MissOutcome> {
        let total = self.games.iter().map(Vec::len).sum();
        let mut records = Vec::with_capacity(total);
        for game in self.games {
            records.extend(game);
        }
        records
    }
}

/// LOC_X, LOC_Y, SHOT_DISTANCE, NEXT columns, one row per record.
pub fn to_dataframe(records: &[MissOutcome]) -> Result<DataFrame> {
    let loc_x: Vec<i64> = records.iter().map(|r| r.loc_x).collect();
    let loc_y: Vec<i64> = records.iter().map(|r| r.loc_y).collect();
    let distance: Vec<i64> = records.iter().map(|r| r.shot_distance).collect();
    let next: Vec<i32> = records.iter().map(|r| r.next).collect();
    let df = DataFrame::new(vec![
        Series::new("LOC_X", loc_x),
        Series::new("LOC_Y", loc_y),
        Series::new("SHOT_DISTANCE", distance),
        Series::new("NEXT", next),
    ])?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nba::classifier::classify_misses;

    fn loc(event: i64, x: i64, y: i64, distance: i64) -> ShotLocation {
        ShotLocation { game_id: "0021500001".to_string(), game_event_id: event, loc_x: x, loc_y: y, shot_distance: distance }
    }

    fn game_rows() -> Vec<EventRow> {
        let mut rows = vec![
            EventRow::new("0021500001", 4, EventMsgType::MissedShot, Some("MISS Horford 12' Jump Shot"), None),
            EventRow::new("0021500001", 5, EventMsgType::MadeShot, None, Some("Drummond 1' Dunk (2 PTS)")),
            EventRow::new("0021500001", 8, EventMsgType::MissedShot, None, Some("MISS Jackson 25' 3PT Jump Shot")),
            EventRow::new("0021500001", 9, EventMsgType::MadeShot, None, Some("Morris 24' 3PT Jump Shot (3 PTS)")),
            EventRow::new("0021500001", 11, EventMsgType::MissedShot, Some("MISS Korver 26' 3PT Jump Shot"), None),
        ];
        classify_misses(&mut rows);
        rows
    }

    #[test]
    fn matched_misses_carry_location_and_value() {
        let rows = game_rows();
        let outcomes = join_miss_locations(&rows, &[loc(8, 230, 40, 24), loc(4, -97, 74, 12)]);
        assert_eq!(
            outcomes,
            vec![
                MissOutcome { loc_x: -97, loc_y: 74, shot_distance: 12, next: -2 },
                MissOutcome { loc_x: 230, loc_y: 40, shot_distance: 24, next: 3 },
            ]
        );
    }

    #[test]
    fn unmatched_misses_and_non_misses_are_dropped() {
        let rows = game_rows();
        // event 5 is a make, event 11 has no location
        let outcomes = join_miss_locations(&rows, &[loc(5, 0, 10, 1), loc(4, -97, 74, 12), loc(99, 1, 1, 0)]);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].next, -2);
    }

    #[test]
    fn records_serialize_as_flat_objects() {
        let json = serde_json::to_value(&[MissOutcome { loc_x: -97, loc_y: 74, shot_distance: 12, next: -2 }]).unwrap();
        assert_eq!(json, serde_json::json!([{"loc_x": -97, "loc_y": 74, "shot_distance": 12, "next": -2}]));
    }

    #[test]
    fn table_concatenates_games_once() {
        let mut table = MissLocationTable::new();
        table.push_game(vec![MissOutcome { loc_x: 1, loc_y: 2, shot_distance: 3, next: 2 }]);
        table.push_game(vec![]);
        table.push_game(vec![
            MissOutcome { loc_x: 4, loc_y: 5, shot_distance: 6, next: -3 },
            MissOutcome { loc_x: 7, loc_y: 8, shot_distance: 9, next: 0 },
        ]);
        assert_eq!(table.games(), 3);
        let records = table.into_records();
        assert_eq!(records.iter().map(|r| r.next).collect::<Vec<_>>(), vec![2, -3, 0]);

        let df = to_dataframe(&records).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 4);
        let next: Vec<Option<i32>> = df.column("NEXT").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(next, vec![Some(2), Some(-3), Some(0)]);
    }
}
