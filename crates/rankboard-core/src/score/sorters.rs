//! Sort registry for the model score leaderboard.

use std::cmp::Ordering;

use super::record::ScoreRecord;
use crate::registry::{SortDef, SortRegistry};

/// Smallest context window first. The default order of the score leaderboard.
pub fn context(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.meta.context.cmp(&b.meta.context)
}

fn acc_loose(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score.acc.loose.total_cmp(&b.score.acc.loose)
}

fn acc_strict(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score.acc.strict.total_cmp(&b.score.acc.strict)
}

fn rouge1(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score
        .rouge
        .rouge1
        .fscore
        .total_cmp(&b.score.rouge.rouge1.fscore)
}

fn rouge2(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score
        .rouge
        .rouge2
        .fscore
        .total_cmp(&b.score.rouge.rouge2.fscore)
}

fn rouge_l(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score
        .rouge
        .rouge_l
        .fscore
        .total_cmp(&b.score.rouge.rouge_l.fscore)
}

fn bleurt(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score.bleurt.total_cmp(&b.score.bleurt)
}

fn gpt(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    a.score.gpt.total_cmp(&b.score.gpt)
}

/// Build the score sort registry. Every sort negates for descending.
pub fn sorters() -> SortRegistry<ScoreRecord> {
    SortRegistry::new()
        .with("context", SortDef::new(context))
        .with("acc_loose", SortDef::new(acc_loose))
        .with("acc_strict", SortDef::new(acc_strict))
        .with("rouge1", SortDef::new(rouge1))
        .with("rouge2", SortDef::new(rouge2))
        .with("rouge_l", SortDef::new(rouge_l))
        .with("bleurt", SortDef::new(bleurt))
        .with("gpt", SortDef::new(gpt))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::registry::Direction;
    use crate::score::record::ModelType;
    use crate::score::record::fixtures::record;

    #[test]
    fn every_sort_is_symmetric() {
        let registry = sorters();
        assert_eq!(registry.len(), 8);
        assert!(registry.iter().all(|(_, def)| def.is_symmetric()));
    }

    #[test]
    fn each_sort_reads_its_own_field() {
        let mut lo = record("lo", ModelType::Foundation, 1);
        let mut hi = record("hi", ModelType::Foundation, 2);
        lo.score.acc.loose = 0.1;
        hi.score.acc.loose = 0.2;
        lo.score.acc.strict = 0.1;
        hi.score.acc.strict = 0.2;
        lo.score.rouge.rouge1.fscore = 0.1;
        hi.score.rouge.rouge1.fscore = 0.2;
        lo.score.rouge.rouge2.fscore = 0.1;
        hi.score.rouge.rouge2.fscore = 0.2;
        lo.score.rouge.rouge_l.fscore = 0.1;
        hi.score.rouge.rouge_l.fscore = 0.2;
        lo.score.bleurt = 0.1;
        hi.score.bleurt = 0.2;
        lo.score.gpt = 0.1;
        hi.score.gpt = 0.2;
        for (id, def) in sorters().iter() {
            assert_eq!(def.compare(Direction::Ascending, &lo, &hi), Ordering::Less, "{id}");
            assert_eq!(def.compare(Direction::Descending, &lo, &hi), Ordering::Greater, "{id}");
        }
    }

    #[test]
    fn precision_and_recall_do_not_affect_rouge_sort() {
        let mut a = record("a", ModelType::Other, 1);
        let mut b = record("b", ModelType::Other, 1);
        a.score.rouge.rouge1.precision = 0.9;
        b.score.rouge.rouge1.recall = 0.9;
        assert_eq!(rouge1(&a, &b), Ordering::Equal);
    }

    fn arb_record() -> impl Strategy<Value = ScoreRecord> {
        (0u64..5, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0).prop_map(
            |(ctx, acc, rouge, bleurt, gpt)| {
                let mut r = record("r", ModelType::Finetune, ctx * 1024);
                r.score.acc.loose = acc;
                r.score.acc.strict = acc / 2.0;
                r.score.rouge.rouge1.fscore = rouge;
                r.score.rouge.rouge2.fscore = rouge / 2.0;
                r.score.rouge.rouge_l.fscore = rouge / 3.0;
                r.score.bleurt = bleurt;
                r.score.gpt = gpt;
                r
            },
        )
    }

    proptest! {
        #[test]
        fn descending_negates_ascending(a in arb_record(), b in arb_record()) {
            for (id, def) in sorters().iter() {
                prop_assert_eq!(
                    def.compare(Direction::Descending, &a, &b),
                    def.compare(Direction::Ascending, &a, &b).reverse(),
                    "{}", id
                );
            }
        }

        /// Sorting ascending then reversing equals sorting descending.
        #[test]
        fn reversed_ascending_is_descending(rows in prop::collection::vec(arb_record(), 0..25)) {
            for (id, def) in sorters().iter() {
                let mut asc: Vec<usize> = (0..rows.len()).collect();
                asc.sort_by(|&i, &j| {
                    def.compare(Direction::Ascending, &rows[i], &rows[j]).then(i.cmp(&j))
                });
                asc.reverse();
                let mut desc: Vec<usize> = (0..rows.len()).collect();
                desc.sort_by(|&i, &j| {
                    def.compare(Direction::Descending, &rows[i], &rows[j]).then(j.cmp(&i))
                });
                prop_assert_eq!(asc, desc, "{}", id);
            }
        }
    }
}
