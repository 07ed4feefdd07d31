//! Model evaluation leaderboard.

mod filters;
mod record;
mod sorters;

use std::sync::LazyLock;

use crate::registry::Leaderboard;

pub use filters::filters;
pub use record::{
    AccuracyScore, EvaluationScore, ModelType, RougeScore, RougeScorePart, ScoreRecord,
    SubmissionMetadata,
};
pub use sorters::{context, sorters};

pub type ScoreLeaderboard = Leaderboard<ScoreRecord, ModelType>;

/// The score leaderboard, built on first use. Unsorted views order by context length.
pub static SCORES: LazyLock<ScoreLeaderboard> =
    LazyLock::new(|| Leaderboard::new("scores", filters(), sorters(), context));
