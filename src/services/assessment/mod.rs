//! Turns unreliable model output into a fixed-size, category-balanced question set.
//!
//! Stages run in order: normalize, classify and allocate against the quota table,
//! sanitize options, then shuffle and renumber. Everything here is synchronous and
//! pure apart from the injected shuffle RNG.

pub mod allocator;
pub mod classifier;
pub mod fallback_bank;
pub mod interpret;
pub mod normalizer;
pub mod options;
pub mod sequencer;

use rand::Rng;
use serde_json::Value;

use crate::models::domain::{Question, StudentContext};

pub use allocator::{allocate, QuotaTable};
pub use fallback_bank::FallbackBank;
pub use interpret::candidates_from_response;
pub use normalizer::normalize_candidates;

pub fn build_assessment_set<R: Rng + ?Sized>(
    raw_candidates: Value,
    quotas: &QuotaTable,
    context: &StudentContext,
    rng: &mut R,
) -> Vec<Question> {
    let candidates = normalize_candidates(raw_candidates);
    let bank = FallbackBank::for_student(context);

    let mut selected = allocate(&candidates, quotas, &bank);
    selected.truncate(quotas.total());
    sequencer::shuffle_and_resequence(selected, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::RiasecCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::{BTreeMap, HashSet};

    fn four_options() -> Value {
        json!([
            {"id": "a", "text": "Build it"},
            {"id": "b", "text": "Draw it"},
            {"id": "c", "text": "Plan it"},
            {"id": "d", "text": "Study it"}
        ])
    }

    fn assert_well_formed(questions: &[Question]) {
        let ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), questions.len());

        for (k, question) in questions.iter().enumerate() {
            assert_eq!(question.id, format!("q{}", k + 1));
            assert_eq!(question.options.len(), 4);
            let option_ids: HashSet<&str> = question.options.iter().map(|o| o.id.as_str()).collect();
            assert_eq!(option_ids.len(), 4);
            assert!(question
                .options
                .iter()
                .all(|o| !o.id.is_empty() && !o.text.is_empty()));
        }
    }

    fn category_counts(questions: &[Question]) -> BTreeMap<RiasecCode, usize> {
        let mut counts = BTreeMap::new();
        for q in questions {
            if let Some(code) = q.primary_code() {
                *counts.entry(code).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn empty_model_output_still_meets_every_quota() {
        let quotas = QuotaTable::default();
        let mut rng = StdRng::seed_from_u64(11);
        let questions = build_assessment_set(json!([]), &quotas, &StudentContext::default(), &mut rng);

        assert_eq!(questions.len(), 10);
        assert_well_formed(&questions);
        for (code, need) in quotas.iter() {
            assert_eq!(category_counts(&questions)[&code], need, "count for {code}");
        }
    }

    #[test]
    fn surplus_model_questions_keep_original_order() {
        let raw = json!([
            {"id": "r-a", "prompt": "First", "options": four_options(), "tags": ["R"]},
            {"id": "r-b", "prompt": "Second", "options": four_options(), "tags": ["R"]},
            {"id": "r-c", "prompt": "Third", "options": four_options(), "tags": ["R"]}
        ]);
        let quotas = QuotaTable::new(vec![(RiasecCode::R, 2)]);
        let mut rng = StdRng::seed_from_u64(5);
        let questions = build_assessment_set(raw, &quotas, &StudentContext::default(), &mut rng);

        let mut prompts: Vec<&str> = questions.iter().map(|q| q.prompt.as_str()).collect();
        prompts.sort();
        assert_eq!(prompts, vec!["First", "Second"]);
        assert_well_formed(&questions);
    }

    #[test]
    fn one_option_question_is_padded_with_defaults() {
        let raw = json!([
            {"id": "inv", "prompt": "Why does ice float?", "options": [{"id": "b", "text": "Density"}], "tags": ["I"]}
        ]);
        let quotas = QuotaTable::new(vec![(RiasecCode::I, 1)]);
        let mut rng = StdRng::seed_from_u64(9);
        let questions = build_assessment_set(raw, &quotas, &StudentContext::default(), &mut rng);

        assert_eq!(questions.len(), 1);
        let texts: Vec<&str> = questions[0].options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Sounds exactly like me", "Somewhat like me", "A little like me", "Not like me"]
        );
    }

    #[test]
    fn two_option_question_keeps_its_own_choices() {
        let raw = json!([
            {"id": "inv", "prompt": "Why does ice float?", "options": [
                {"id": "b", "text": "Density"},
                {"id": "x", "text": "Magic"}
            ], "tags": ["I"]}
        ]);
        let quotas = QuotaTable::new(vec![(RiasecCode::I, 1)]);
        let mut rng = StdRng::seed_from_u64(9);
        let questions = build_assessment_set(raw, &quotas, &StudentContext::default(), &mut rng);

        let option_ids: Vec<&str> = questions[0].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(option_ids, vec!["b", "x", "a", "c"]);
    }

    #[test]
    fn garbage_everywhere_still_yields_a_full_set() {
        let raw = json!([
            null,
            "question",
            {"id": "dup", "tags": ["S"]},
            {"id": "dup", "prompt": "  Helping out  ", "options": "none", "tags": ["Social", "S"]},
            {"prompt": "No tags", "options": four_options()}
        ]);
        let quotas = QuotaTable::default();
        let mut rng = StdRng::seed_from_u64(21);
        let questions = build_assessment_set(raw, &quotas, &StudentContext::default(), &mut rng);

        assert_eq!(questions.len(), 10);
        assert_well_formed(&questions);
        assert_eq!(category_counts(&questions)[&RiasecCode::S], 2);
        assert!(questions.iter().any(|q| q.prompt == "Helping out"));
    }

    #[test]
    fn fallback_prompts_carry_student_details() {
        let context = StudentContext {
            hobbies_and_passions: vec!["origami".to_string()],
            dream_job: Some("architect".to_string()),
            ..StudentContext::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let questions = build_assessment_set(json!([]), &QuotaTable::default(), &context, &mut rng);

        assert!(questions.iter().any(|q| q.prompt.contains("origami")));
    }
}
