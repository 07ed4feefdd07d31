//! Model evaluation score records, in the shape the leaderboard data files use.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelType {
    Foundation,
    Finetune,
    Prompt,
    Other,
}

impl ModelType {
    pub const ALL: [ModelType; 4] = [
        ModelType::Foundation,
        ModelType::Finetune,
        ModelType::Prompt,
        ModelType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Foundation => "foundation",
            ModelType::Finetune => "finetune",
            ModelType::Prompt => "prompt",
            ModelType::Other => "other",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyScore {
    pub loose: f64,
    pub strict: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScorePart {
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScore {
    pub rouge1: RougeScorePart,
    pub rouge2: RougeScorePart,
    #[serde(rename = "rougeL")]
    pub rouge_l: RougeScorePart,
}

/// Aggregate metrics for one system in one evaluation setting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationScore {
    pub acc: AccuracyScore,
    pub rouge: RougeScore,
    pub bleurt: f64,
    pub gpt: f64,
}

/// Who built a system and how it was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    pub name: String,
    pub authors: String,
    #[serde(default)]
    pub url: Option<String>,
    pub citation: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub context: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trained_for_function_calling: Option<bool>,
    /// Always written, as `null` when absent.
    #[serde(default)]
    pub details: Option<String>,
}

/// One leaderboard row: submission metadata merged with one setting's scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(flatten)]
    pub meta: SubmissionMetadata,
    #[serde(flatten)]
    pub score: EvaluationScore,
}

impl ScoreRecord {
    pub fn new(meta: SubmissionMetadata, score: EvaluationScore) -> Self {
        Self { meta, score }
    }
}
