use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON_OBJECT is a valid regex pattern"));

/// The widest `{ ... }` span in model output: first opening brace to last closing brace.
pub fn json_object_span(raw: &str) -> Option<&str> {
    JSON_OBJECT.find(raw).map(|m| m.as_str())
}

/// Parses the widest `{ ... }` span in model output, tolerating prose or code fences around it.
pub fn extract_json_object(raw: &str) -> Option<Value> {
    let span = json_object_span(raw)?;
    match serde_json::from_str::<Value>(span) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Model output held a brace span that is not JSON: {}", e);
            None
        }
    }
}

/// The `questions` value of the model's reply, or an empty list when there is nothing usable.
pub fn candidates_from_response(raw: &str) -> Value {
    extract_json_object(raw)
        .and_then(|mut object| object.get_mut("questions").map(Value::take))
        .unwrap_or_else(|| Value::Array(Vec::new()))
}
