use std::collections::HashSet;

use serde_json::Value;

use crate::models::domain::QuestionOption;
use crate::services::assessment::normalizer::first_text;

pub const OPTIONS_PER_QUESTION: usize = 4;

/// Fewer valid options than this and the whole list is replaced.
const MIN_USABLE_OPTIONS: usize = 2;

const LIKERT_OPTIONS: [(&str, &str); OPTIONS_PER_QUESTION] = [
    ("a", "Sounds exactly like me"),
    ("b", "Somewhat like me"),
    ("c", "A little like me"),
    ("d", "Not like me"),
];

pub fn likert_options() -> Vec<QuestionOption> {
    LIKERT_OPTIONS
        .iter()
        .map(|(id, text)| QuestionOption::new(id, text))
        .collect()
}

/// Reads option records out of an arbitrary JSON value, keeping those with a usable id and text.
/// `id` falls back to `key`, `text` falls back to `label`.
pub fn parse_options(value: &Value) -> Vec<QuestionOption> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|option| {
            let id = first_text(option, &["id", "key"])?;
            let text = first_text(option, &["text", "label"])?;
            Some(QuestionOption { id, text })
        })
        .collect()
}

/// Returns exactly four options with non-empty, unique ids.
pub fn sanitize_options(options: &[QuestionOption]) -> Vec<QuestionOption> {
    let mut ids = HashSet::new();
    let mut valid: Vec<QuestionOption> = options
        .iter()
        .filter_map(|option| {
            let id = option.id.trim();
            let text = option.text.trim();
            if id.is_empty() || text.is_empty() || !ids.insert(id.to_string()) {
                return None;
            }
            Some(QuestionOption::new(id, text))
        })
        .collect();

    if valid.len() < MIN_USABLE_OPTIONS {
        return likert_options();
    }

    valid.truncate(OPTIONS_PER_QUESTION);
    let kept: HashSet<String> = valid.iter().map(|o| o.id.clone()).collect();

    for (id, text) in LIKERT_OPTIONS {
        if valid.len() >= OPTIONS_PER_QUESTION {
            break;
        }
        if kept.contains(id) {
            continue;
        }
        valid.push(QuestionOption::new(id, text));
    }

    valid
}

pub fn sanitize_option_value(value: &Value) -> Vec<QuestionOption> {
    sanitize_options(&parse_options(value))
}
