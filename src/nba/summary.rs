use crate::nba::join::MissOutcome;

use std::collections::BTreeMap;
use tabled::Tabled;

/// Half-court cutoff in LOC_Y units; shots beyond it are heaves.
pub const HALF_COURT_LOC_Y: f64 = 422.5;
const MIN_NEXT: i32 = -4;
const MAX_NEXT: i32 = 4;

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct NextValueCount {
    pub next: i32,
    pub misses: usize,
    pub share: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct DistanceBucket {
    pub distance: String,
    pub misses: usize,
    pub mean_next: String,
}

fn in_half_court(r: &MissOutcome) -> bool {
    (r.loc_y as f64) < HALF_COURT_LOC_Y
}

/// Miss count per NEXT value from -4 to 4.
pub fn next_value_distribution(records: &[MissOutcome]) -> Vec<NextValueCount> {
    let total = records.len();
    (MIN_NEXT..=MAX_NEXT)
        .rev()
        .map(|next| {
            let misses = records.iter().filter(|r| r.next == next).count();
            let share = if total == 0 { 0.0 } else { misses as f64 / total as f64 * 100.0 };
            NextValueCount { next, misses, share: format!("{:.1}%", share) }
        })
        .collect()
}

/// Mean NEXT of half-court misses grouped into `bucket_feet` wide
/// shot-distance buckets.
pub fn distance_profile(records: &[MissOutcome], bucket_feet: i64) -> Vec<DistanceBucket> {
    let width = bucket_feet.max(1);
    let mut buckets: BTreeMap<i64, (usize, i64)> = BTreeMap::new();
    for r in records.iter().filter(|r| in_half_court(r)) {
        let entry = buckets.entry(r.shot_distance / width).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += r.next as i64;
    }
    buckets
        .into_iter()
        .map(|(bucket, (misses, total_next))| DistanceBucket {
            distance: format!("{}-{} ft", bucket * width, bucket * width + width - 1),
            misses,
            mean_next: format!("{:.3}", total_next as f64 / misses as f64),
        })
        .collect()
}
