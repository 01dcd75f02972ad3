use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::domain::{Question, QuestionOption};
use crate::services::assessment::options::parse_options;

/// A single element of the model's `questions` array, sorted by how much of it can be trusted.
#[derive(Clone, Debug, PartialEq)]
pub enum RawCandidate {
    /// Exactly the requested shape with every field populated.
    WellFormed(Question),
    /// A JSON object whose fields need coercion or alternate-name lookups.
    Partial(Map<String, Value>),
    /// Anything that is not an object.
    Garbage,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StrictOption {
    id: String,
    text: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StrictCandidate {
    id: String,
    prompt: String,
    options: Vec<StrictOption>,
    #[serde(default)]
    scenario: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl StrictCandidate {
    fn into_question(self) -> Option<Question> {
        let id = self.id.trim();
        let prompt = self.prompt.trim();
        if id.is_empty() || prompt.is_empty() {
            return None;
        }

        let mut options = Vec::with_capacity(self.options.len());
        for option in self.options {
            let (id, text) = (option.id.trim(), option.text.trim());
            if id.is_empty() || text.is_empty() {
                return None;
            }
            options.push(QuestionOption::new(id, text));
        }

        Some(Question {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options,
            scenario: self.scenario.filter(|s| !s.is_empty()),
            tags: self.tags.filter(|t| !t.is_empty()),
        })
    }
}

impl RawCandidate {
    pub fn classify(value: Value) -> Self {
        let Value::Object(map) = value else {
            return RawCandidate::Garbage;
        };

        let strict = serde_json::from_value::<StrictCandidate>(Value::Object(map.clone()))
            .ok()
            .and_then(StrictCandidate::into_question);

        match strict {
            Some(question) => RawCandidate::WellFormed(question),
            None => RawCandidate::Partial(map),
        }
    }
}

/// Renders a scalar as trimmed text. Strings and numbers qualify; empty results do not.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// First non-empty scalar among `keys`, in order.
pub(crate) fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(scalar_text)
}

struct IdAllocator {
    seen: HashSet<String>,
    counter: usize,
}

impl IdAllocator {
    fn new() -> Self {
        IdAllocator {
            seen: HashSet::new(),
            counter: 1,
        }
    }

    fn assign(&mut self, provided: Option<String>) -> String {
        let id = match provided {
            Some(id) if !self.seen.contains(&id) => id,
            _ => loop {
                let synthesized = format!("q{}", self.counter);
                self.counter += 1;
                if !self.seen.contains(&synthesized) {
                    break synthesized;
                }
            },
        };
        self.seen.insert(id.clone());
        id
    }
}

fn coerce_partial(map: &Map<String, Value>) -> (Option<String>, Question) {
    let provided_id = first_text(map, &["id"]);
    let prompt = first_text(map, &["prompt", "question"]).unwrap_or_default();
    let options = map.get("options").map(parse_options).unwrap_or_default();

    let scenario = match map.get("scenario") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };

    let tags = match map.get("tags") {
        Some(Value::Array(items)) => {
            let tags: Vec<String> = items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect();
            (!tags.is_empty()).then_some(tags)
        }
        _ => None,
    };

    let question = Question {
        id: String::new(),
        prompt,
        options,
        scenario,
        tags,
    };
    (provided_id, question)
}

/// Coerces the model's `questions` value into well-shaped records with unique ids.
/// Order is preserved; non-object elements are dropped. Never fails.
pub fn normalize_candidates(input: Value) -> Vec<Question> {
    let Value::Array(items) = input else {
        return Vec::new();
    };

    let mut ids = IdAllocator::new();
    let mut normalized = Vec::with_capacity(items.len());

    for item in items {
        let (provided_id, mut question) = match RawCandidate::classify(item) {
            RawCandidate::WellFormed(question) => (Some(question.id.clone()), question),
            RawCandidate::Partial(map) => coerce_partial(&map),
            RawCandidate::Garbage => continue,
        };
        question.id = ids.assign(provided_id);
        normalized.push(question);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_list_input_yields_nothing() {
        assert!(normalize_candidates(json!({"questions": []})).is_empty());
        assert!(normalize_candidates(json!("questions")).is_empty());
        assert!(normalize_candidates(Value::Null).is_empty());
    }

    #[test]
    fn classify_separates_shapes() {
        let well_formed = json!({
            "id": "x1",
            "prompt": "Pick one",
            "options": [{"id": "a", "text": "Yes"}],
            "tags": ["R"]
        });
        assert!(matches!(
            RawCandidate::classify(well_formed),
            RawCandidate::WellFormed(_)
        ));

        let alternate_names = json!({"question": "Pick one", "options": [{"key": "a", "label": "Yes"}]});
        assert!(matches!(
            RawCandidate::classify(alternate_names),
            RawCandidate::Partial(_)
        ));

        assert_eq!(RawCandidate::classify(json!(42)), RawCandidate::Garbage);
        assert_eq!(RawCandidate::classify(json!(["R"])), RawCandidate::Garbage);
    }

    #[test]
    fn malformed_items_are_dropped_or_defaulted() {
        let input = json!([
            "not a record",
            {"id": "dup", "prompt": "First", "options": [{"id": "a", "text": "One"}]},
            {"id": "dup", "question": "  Second  "},
            {"options": "nope", "tags": "R"},
            7,
            {"id": "  ", "prompt": "Fourth", "options": [{"id": "", "text": "x"}, {"key": "b", "label": "Two"}, "junk"]}
        ]);

        let questions = normalize_candidates(input);
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "q1", "q2", "q3"]);

        assert_eq!(questions[1].prompt, "Second");
        assert!(questions[1].options.is_empty());
        assert_eq!(questions[2].prompt, "");
        assert_eq!(questions[2].tags, None);
        assert_eq!(questions[3].options, vec![QuestionOption::new("b", "Two")]);
    }

    #[test]
    fn synthesized_ids_skip_ids_already_taken() {
        let input = json!([
            {"id": "q1", "prompt": "A"},
            {"prompt": "B"},
            {"id": "q1", "prompt": "C"}
        ]);

        let ids: Vec<String> = normalize_candidates(input).into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn numeric_ids_and_prompts_are_stringified() {
        let input = json!([{"id": 5, "prompt": 12, "options": [{"id": 1, "text": "One"}]}]);
        let questions = normalize_candidates(input);

        assert_eq!(questions[0].id, "5");
        assert_eq!(questions[0].prompt, "12");
        assert_eq!(questions[0].options[0].id, "1");
    }

    #[test]
    fn falsy_scenario_and_tags_are_absent() {
        let input = json!([
            {"id": "a", "prompt": "P", "scenario": "", "tags": []},
            {"id": "b", "prompt": "P", "scenario": {"place": "lab"}, "tags": [1, "I"]}
        ]);
        let questions = normalize_candidates(input);

        assert_eq!(questions[0].scenario, None);
        assert_eq!(questions[0].tags, None);
        assert_eq!(questions[1].scenario, None);
        assert_eq!(questions[1].tags, Some(vec!["I".to_string()]));
    }
}
