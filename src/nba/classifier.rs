//! Next-possession value of missed shots.
//!
//! Every missed shot gets a signed point value taken from the one or two
//! shooting events that follow it: positive when the missing team scored
//! next, negative when the opponent did. The window is two rows deep and
//! the first event after the miss decides the branch; nothing further out
//! is looked at.

use crate::nba::events::{EventMsgType, EventRow, Side};

use log::{debug, warn};

/// Annotates the missed-shot rows of one game in place. `rows` must hold
/// only shooting events, ordered by event number.
///
/// Running out of rows ends the scan: rows past that point keep 0.
pub fn classify_misses(rows: &mut [EventRow]) {
    for i in 0..rows.len() {
        if rows[i].msg_type != EventMsgType::MissedShot {
            continue;
        }
        let missing_side = rows[i].missing_side();

        let next_shot = match rows.get(i + 1) {
            Some(r) => r,
            None => {
                debug!("miss {} is the last shooting event", rows[i].event_num);
                break;
            }
        };

        let value = match next_shot.msg_type {
            EventMsgType::MadeShot => {
                let shooter = next_shot.acting_side();
                let mut value = 2;
                if next_shot.description(shooter).contains("3PT") {
                    value += 1;
                }
                // and-one needs the row after the make
                let after = match rows.get(i + 2) {
                    Some(r) => r,
                    None => break,
                };
                if after.msg_type == EventMsgType::FreeThrow
                    && after.acting_side() == shooter
                    && !after.description(shooter).contains("MISS")
                {
                    value += 1;
                }
                sign(missing_side, shooter) * value
            }
            EventMsgType::MissedShot => 0,
            EventMsgType::FreeThrow => {
                let shooter = next_shot.acting_side();
                sign(missing_side, shooter) * free_throw_value(rows, i + 1, shooter)
            }
            EventMsgType::Other(_) => 0,
        };

        rows[i].next += value;
    }
}

fn sign(missing_side: Side, scoring_side: Side) -> i32 {
    if missing_side == scoring_side {
        1
    } else {
        -1
    }
}

// Points from the free-throw trip starting at `start`.
fn free_throw_value(rows: &[EventRow], start: usize, shooter: Side) -> i32 {
    let desc = rows[start].description(shooter);
    if desc.contains("of") {
        let attempts = match attempts_in_trip(desc) {
            Some(n) => n,
            None => {
                warn!("unreadable free throw description: {}", desc);
                return 0;
            }
        };
        let end = (start + attempts).min(rows.len());
        let missed = rows[start..end]
            .iter()
            .filter(|r| r.description(shooter).contains("MISS"))
            .count();
        attempts as i32 - missed as i32
    } else if desc.contains("Technical") && !desc.contains("MISS") {
        1
    } else {
        0
    }
}

// "Free Throw 1 of 2" -> 2. Only the first digit after " of " counts.
fn attempts_in_trip(desc: &str) -> Option<usize> {
    let (_, rest) = desc.split_once(" of ")?;
    let digit = rest.chars().next()?.to_digit(10)?;
    Some(digit as usize)
}
