//! Plain-text table rendering for leaderboard rows and registry contents.

use std::fmt::{Display, Write};

use rankboard_core::Leaderboard;
use rankboard_core::plot::{LotteryStatus, PlotRecord};
use rankboard_core::score::ScoreRecord;

const MAX_NAME: usize = 32;

// ── Plots ──

fn lottery_cell(status: LotteryStatus) -> String {
    match status {
        LotteryStatus::NotLottery => "FCFS".to_string(),
        LotteryStatus::UnknownOrStale => "Missing/Outdated".to_string(),
        LotteryStatus::Phase { phase, entries } => match entries {
            Some(n) => format!("{phase} ({n} entries)"),
            None => phase.to_string(),
        },
    }
}

pub fn render_plots(rows: &[&PlotRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36} {:<7} {:>12} {:<13} {:<24} {}",
        "address", "size", "price", "tenants", "lottery", "updated"
    );
    for plot in rows {
        let _ = writeln!(
            out,
            "{:<36} {:<7} {:>12} {:<13} {:<24} {}",
            plot.address(),
            plot.size,
            plot.price,
            plot.tenants,
            lottery_cell(plot.lottery),
            plot.last_updated.format("%Y-%m-%d %H:%M"),
        );
    }
    let _ = writeln!(out, "{} plots", rows.len());
    out
}

// ── Scores ──

fn short_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME {
        let head: String = name.chars().take(MAX_NAME - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

pub fn render_scores(rows: &[&ScoreRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:<10} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "name", "type", "context", "acc", "strict", "r1", "r2", "rL", "bleurt", "gpt"
    );
    for row in rows {
        let s = &row.score;
        let _ = writeln!(
            out,
            "{:<32} {:<10} {:>8} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3}",
            short_name(&row.meta.name),
            row.meta.model_type,
            row.meta.context,
            s.acc.loose,
            s.acc.strict,
            s.rouge.rouge1.fscore,
            s.rouge.rouge2.fscore,
            s.rouge.rouge_l.fscore,
            s.bleurt,
            s.gpt,
        );
    }
    let _ = writeln!(out, "{} systems", rows.len());
    out
}

// ── Registry ──

/// List a leaderboard's filters with their options, then its sorts.
pub fn render_options<R, V: Display>(board: &Leaderboard<R, V>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", board.name());
    let _ = writeln!(out);
    let _ = writeln!(out, "Filters");
    for (id, def) in board.filters().iter() {
        let _ = writeln!(out, "  {id}");
        for opt in def.options() {
            let _ = writeln!(out, "    {:<20} {}", opt.label, opt.value);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Sorts");
    for (id, def) in board.sorters().iter() {
        if def.is_symmetric() {
            let _ = writeln!(out, "  {id}");
        } else {
            let _ = writeln!(out, "  {id}  (unknown values last in both directions)");
        }
    }
    out
}
