//! Housing plot leaderboard.

mod filters;
mod record;
mod sorters;

use std::sync::LazyLock;

use crate::registry::Leaderboard;

pub use filters::{PhaseOption, PlotFilterValue, filters};
pub use record::{
    DISTRICTS, EMPYREUM, GOBLET, HouseSize, LAVENDER_BEDS, LotteryStatus, LottoPhase,
    MAX_PLOT_NUMBER, MAX_WARD_NUMBER, MIST, PlotRecord, SHIROGANE, Tenants, district_name,
    is_lottery, is_unknown_or_outdated_phase,
};
pub use sorters::{address, sorters};

pub type PlotLeaderboard = Leaderboard<PlotRecord, PlotFilterValue>;

/// The plot leaderboard, built on first use. Ties break by address.
pub static PLOTS: LazyLock<PlotLeaderboard> =
    LazyLock::new(|| Leaderboard::new("plots", filters(), sorters(), address));
