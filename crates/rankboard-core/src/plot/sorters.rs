//! Sort registry for the housing plot leaderboard.

use std::cmp::Ordering;

use super::record::{LotteryStatus, PlotRecord};
use crate::registry::{SortDef, SortRegistry};

/// Lexicographic (district, ward, plot) order. Used as the tie-break.
pub fn address(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    a.district_id
        .cmp(&b.district_id)
        .then(a.ward_number.cmp(&b.ward_number))
        .then(a.plot_number.cmp(&b.plot_number))
}

fn size(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    a.size.cmp(&b.size)
}

fn price(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    a.price.cmp(&b.price)
}

/// Entry count of a plot with a current lottery phase. A missing count is zero.
fn known_entries(plot: &PlotRecord) -> Option<i64> {
    match plot.lottery {
        LotteryStatus::Phase { entries, .. } => Some(i64::from(entries.unwrap_or(0))),
        LotteryStatus::NotLottery | LotteryStatus::UnknownOrStale => None,
    }
}

// Unknown counts rank as the largest value ascending and the smallest value
// descending, so they are last in both directions.

fn entries(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    let key = |p: &PlotRecord| known_entries(p).unwrap_or(i64::MAX);
    key(a).cmp(&key(b))
}

fn entries_desc(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    let key = |p: &PlotRecord| known_entries(p).unwrap_or(i64::MIN);
    key(b).cmp(&key(a))
}

fn phase(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    let key = |p: &PlotRecord| match p.lottery {
        LotteryStatus::Phase { phase, .. } => phase.code(),
        LotteryStatus::NotLottery | LotteryStatus::UnknownOrStale => u8::MAX,
    };
    key(a).cmp(&key(b))
}

/// Most recently updated first.
fn update_time(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    b.last_updated.cmp(&a.last_updated)
}

/// Most recently discovered first.
fn first_seen(a: &PlotRecord, b: &PlotRecord) -> Ordering {
    b.first_seen.cmp(&a.first_seen)
}

/// Build the plot sort registry.
pub fn sorters() -> SortRegistry<PlotRecord> {
    SortRegistry::new()
        .with("size", SortDef::new(size))
        .with("price", SortDef::new(price))
        .with("entries", SortDef::with_desc(entries, entries_desc))
        .with("phase", SortDef::new(phase))
        .with("update_time", SortDef::new(update_time))
        .with("first_seen", SortDef::new(first_seen))
}
