//! Score file ingestion: JSON arrays of leaderboard rows, as written by [`crate::webfmt`].

use std::path::Path;

use rankboard_core::score::ScoreRecord;
use tracing::info;

use crate::IngestError;

pub fn parse_scores(json: &str) -> Result<Vec<ScoreRecord>, IngestError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_scores(path: &Path) -> Result<Vec<ScoreRecord>, IngestError> {
    let json = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let records = parse_scores(&json)?;
    info!(path = %path.display(), count = records.len(), "loaded scores");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use rankboard_core::score::ModelType;

    use super::*;

    #[test]
    fn parses_rows() {
        let json = r#"[{
            "name": "LLaMA 2 70B", "authors": "Meta", "url": null,
            "citation": "Touvron et al., 2023", "type": "FOUNDATION", "context": 4096,
            "acc": {"loose": 0.44, "strict": 0.04},
            "rouge": {
                "rouge1": {"precision": 0.2, "recall": 0.3, "fscore": 0.25},
                "rouge2": {"precision": 0.1, "recall": 0.1, "fscore": 0.1},
                "rougeL": {"precision": 0.2, "recall": 0.2, "fscore": 0.2}
            },
            "bleurt": 0.41, "gpt": 0
        }]"#;
        let rows = parse_scores(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meta.model_type, ModelType::Foundation);
        assert_eq!(rows[0].meta.url, None);
        assert_eq!(rows[0].score.gpt, 0.0);
    }

    #[test]
    fn rejects_unknown_model_type() {
        let json = r#"[{"name": "x", "authors": "y", "citation": "z", "type": "MYSTERY",
            "context": 1, "acc": {"loose": 0, "strict": 0},
            "rouge": {"rouge1": {"precision": 0, "recall": 0, "fscore": 0},
                      "rouge2": {"precision": 0, "recall": 0, "fscore": 0},
                      "rougeL": {"precision": 0, "recall": 0, "fscore": 0}},
            "bleurt": 0, "gpt": 0}]"#;
        assert!(matches!(parse_scores(json), Err(IngestError::Json(_))));
    }
}
