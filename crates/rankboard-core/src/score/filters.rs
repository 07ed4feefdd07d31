//! Filter registry for the model score leaderboard.

use super::record::{ModelType, ScoreRecord};
use crate::registry::{FilterDef, FilterOption, FilterRegistry, Predicate};

fn model_types(values: &[ModelType]) -> Predicate<ScoreRecord> {
    let selected = values.to_vec();
    Box::new(move |row: &ScoreRecord| selected.contains(&row.meta.model_type))
}

/// Build the score filter registry.
pub fn filters() -> FilterRegistry<ScoreRecord, ModelType> {
    let type_options = vec![
        FilterOption::new("Foundation Model", ModelType::Foundation),
        FilterOption::new("Fine-Tuned", ModelType::Finetune),
        FilterOption::new("Prompting", ModelType::Prompt),
        FilterOption::new("Other", ModelType::Other),
    ];
    FilterRegistry::new().with("types", FilterDef::new(type_options, model_types))
}
