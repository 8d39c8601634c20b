use crate::nba::join::MissOutcome;

use anyhow::{bail, Result};
use log::info;
use rusqlite::{params, Connection};
use std::time::Instant;

fn check_table_name(table_name: &str) -> Result<()> {
    let valid = !table_name.is_empty()
        && !table_name.starts_with(|c: char| c.is_ascii_digit())
        && table_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        bail!("invalid table name {}", table_name);
    }
    Ok(())
}

pub fn check_table_exists(conn: &Connection, table_name: &str) -> Result<bool> {
    let mut find_table_stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?")?;
    let found_table = find_table_stmt.exists(params![table_name])?;
    Ok(found_table)
}

/// Replaces `table_name` with `records`, row position stored as `idx`.
pub fn save_miss_outcomes(conn: &mut Connection, table_name: &str, records: &[MissOutcome]) -> Result<()> {
    check_table_name(table_name)?;
    let load_start = Instant::now();
    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table};
         CREATE TABLE {table} (
             idx INTEGER PRIMARY KEY,
             loc_x INTEGER NOT NULL,
             loc_y INTEGER NOT NULL,
             shot_distance INTEGER NOT NULL,
             next INTEGER NOT NULL
         );",
        table = table_name
    ))?;
    {
        let mut insert_stmt = tx.prepare(&format!(
            "INSERT INTO {} (idx, loc_x, loc_y, shot_distance, next) VALUES (?1, ?2, ?3, ?4, ?5)",
            table_name
        ))?;
        for (idx, r) in records.iter().enumerate() {
            insert_stmt.execute(params![idx as i64, r.loc_x, r.loc_y, r.shot_distance, r.next])?;
        }
    }
    tx.commit()?;
    info!("saved {} rows to {}, took {:?}", records.len(), table_name, load_start.elapsed());
    Ok(())
}

pub fn load_miss_outcomes(conn: &Connection, table_name: &str) -> Result<Vec<MissOutcome>> {
    check_table_name(table_name)?;
    if !check_table_exists(conn, table_name)? {
        bail!("no table named {}, run gather first", table_name);
    }
    let mut stmt = conn.prepare(&format!(
        "SELECT loc_x, loc_y, shot_distance, next FROM {} ORDER BY idx",
        table_name
    ))?;
    let rows = stmt.query_map(params![], |row| {
        Ok(MissOutcome {
            loc_x: row.get(0)?,
            loc_y: row.get(1)?,
            shot_distance: row.get(2)?,
            next: row.get(3)?,
        })
    })?;
    let mut records = Vec::new();
    for r in rows {
        records.push(r?);
    }
    Ok(records)
}
