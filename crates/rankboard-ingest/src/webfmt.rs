//! Export of submission results into per-setting web leaderboard files.
//!
//! Each `*.json` in the results directory holds one submission: its
//! `metadata` plus an aggregate score block per evaluation setting. Every
//! setting gets its own leaderboard file whose rows are the metadata merged
//! with that setting's scores.

use std::fmt;
use std::path::Path;

use rankboard_core::score::{EvaluationScore, ScoreRecord, SubmissionMetadata};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    ClosedBook,
    OpenBook,
    EvidenceProvided,
}

impl Setting {
    pub const ALL: [Setting; 3] = [
        Setting::ClosedBook,
        Setting::OpenBook,
        Setting::EvidenceProvided,
    ];

    /// Key of this setting's score block in a result file.
    pub fn key(self) -> &'static str {
        match self {
            Setting::ClosedBook => "closedbook",
            Setting::OpenBook => "openbook",
            Setting::EvidenceProvided => "evidenceprovided",
        }
    }

    /// Name of this setting's leaderboard file.
    pub fn web_file(self) -> &'static str {
        match self {
            Setting::ClosedBook => "web-closedbook.json",
            Setting::OpenBook => "web-openbook.json",
            Setting::EvidenceProvided => "web-wiki-provided.json",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// One evaluated submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub metadata: SubmissionMetadata,
    #[serde(default)]
    pub closedbook: Option<EvaluationScore>,
    #[serde(default)]
    pub openbook: Option<EvaluationScore>,
    #[serde(default)]
    pub evidenceprovided: Option<EvaluationScore>,
}

impl SubmissionResult {
    pub fn score(&self, setting: Setting) -> Option<&EvaluationScore> {
        match setting {
            Setting::ClosedBook => self.closedbook.as_ref(),
            Setting::OpenBook => self.openbook.as_ref(),
            Setting::EvidenceProvided => self.evidenceprovided.as_ref(),
        }
    }
}

/// Leaderboard rows for every setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebBoards {
    closedbook: Vec<ScoreRecord>,
    openbook: Vec<ScoreRecord>,
    evidenceprovided: Vec<ScoreRecord>,
}

impl WebBoards {
    pub fn board(&self, setting: Setting) -> &[ScoreRecord] {
        match setting {
            Setting::ClosedBook => &self.closedbook,
            Setting::OpenBook => &self.openbook,
            Setting::EvidenceProvided => &self.evidenceprovided,
        }
    }

    fn board_mut(&mut self, setting: Setting) -> &mut Vec<ScoreRecord> {
        match setting {
            Setting::ClosedBook => &mut self.closedbook,
            Setting::OpenBook => &mut self.openbook,
            Setting::EvidenceProvided => &mut self.evidenceprovided,
        }
    }

    /// Add a submission's rows. Settings it has no scores for are skipped.
    pub fn push(&mut self, result: &SubmissionResult) {
        for setting in Setting::ALL {
            match result.score(setting) {
                Some(score) => self
                    .board_mut(setting)
                    .push(ScoreRecord::new(result.metadata.clone(), *score)),
                None => warn!(
                    submission = %result.metadata.name,
                    %setting,
                    "no scores for setting, skipping"
                ),
            }
        }
    }
}

impl FromIterator<SubmissionResult> for WebBoards {
    fn from_iter<I: IntoIterator<Item = SubmissionResult>>(iter: I) -> Self {
        let mut boards = WebBoards::default();
        for result in iter {
            boards.push(&result);
        }
        boards
    }
}

/// Read every `*.json` result file in `dir`, in file name order.
pub fn read_results(dir: &Path) -> Result<Vec<SubmissionResult>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut results = Vec::with_capacity(paths.len());
    for path in &paths {
        let json = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        let result = serde_json::from_str(&json).map_err(|e| IngestError::parse(path, e))?;
        results.push(result);
    }
    info!(dir = %dir.display(), count = results.len(), "read submission results");
    Ok(results)
}

/// Write each setting's board to `out_dir` as pretty-printed JSON.
pub fn write_boards(boards: &WebBoards, out_dir: &Path) -> Result<(), IngestError> {
    std::fs::create_dir_all(out_dir).map_err(|e| IngestError::io(out_dir, e))?;
    for setting in Setting::ALL {
        let path = out_dir.join(setting.web_file());
        let rows = boards.board(setting);
        let json = serde_json::to_string_pretty(rows)?;
        std::fs::write(&path, json).map_err(|e| IngestError::io(&path, e))?;
        info!(path = %path.display(), rows = rows.len(), "wrote leaderboard");
    }
    Ok(())
}

/// Read results from `results_dir` and write the web boards to `out_dir`.
pub fn export(results_dir: &Path, out_dir: &Path) -> Result<WebBoards, IngestError> {
    let boards: WebBoards = read_results(results_dir)?.into_iter().collect();
    write_boards(&boards, out_dir)?;
    Ok(boards)
}
