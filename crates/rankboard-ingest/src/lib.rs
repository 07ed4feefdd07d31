//! Ingestion layer: plot snapshots and score files in, web leaderboard files out.

mod error;
pub mod plots;
pub mod scores;
pub mod webfmt;

pub use error::IngestError;
pub use plots::{Freshness, PlotState, load_plots, parse_plots};
pub use scores::{load_scores, parse_scores};
pub use webfmt::{Setting, SubmissionResult, WebBoards, export};
