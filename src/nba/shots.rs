use crate::nba::endpoints::ResultSet;

use anyhow::{Context, Result};

/// Court location of one missed field goal. LOC_X/LOC_Y are tenths of a
/// foot from the rim, SHOT_DISTANCE is in feet.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotLocation {
    pub game_id: String,
    pub game_event_id: i64,
    pub loc_x: i64,
    pub loc_y: i64,
    pub shot_distance: i64,
}

/// Reads the misses (SHOT_MADE_FLAG == 0) out of a `Shot_Chart_Detail`
/// result set.
pub fn locations_from_result_set(result_set: &ResultSet) -> Result<Vec<ShotLocation>> {
    let game_col = result_set.column_index("GAME_ID")?;
    let event_col = result_set.column_index("GAME_EVENT_ID")?;
    let x_col = result_set.column_index("LOC_X")?;
    let y_col = result_set.column_index("LOC_Y")?;
    let distance_col = result_set.column_index("SHOT_DISTANCE")?;
    let made_col = result_set.column_index("SHOT_MADE_FLAG")?;

    let mut misses = Vec::new();
    for (pos, row) in result_set.row_set.iter().enumerate() {
        if ResultSet::i64_at(row, made_col) != Some(0) {
            continue;
        }
        let cell = |idx: usize, name: &str| {
            ResultSet::i64_at(row, idx).with_context(|| format!("shot row {} has no {}", pos, name))
        };
        let game_id = ResultSet::str_at(row, game_col)
            .with_context(|| format!("shot row {} has no GAME_ID", pos))?;
        misses.push(ShotLocation {
            game_id: game_id.to_string(),
            game_event_id: cell(event_col, "GAME_EVENT_ID")?,
            loc_x: cell(x_col, "LOC_X")?,
            loc_y: cell(y_col, "LOC_Y")?,
            shot_distance: cell(distance_col, "SHOT_DISTANCE")?,
        });
    }
    Ok(misses)
}
