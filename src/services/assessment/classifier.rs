use serde_json::Value;

use crate::models::domain::RiasecCode;

/// The first tag naming a RIASEC category, as a bare letter or its full name.
/// Descriptive tags such as `"Bodily-Kinesthetic"` are skipped.
pub fn primary_code(tags: Option<&[String]>) -> Option<RiasecCode> {
    tags?.iter().find_map(|tag| RiasecCode::from_tag(tag))
}

/// Same rule over an untyped `tags` value; non-lists and non-string entries never match.
pub fn primary_code_from_value(tags: &Value) -> Option<RiasecCode> {
    tags.as_array()?
        .iter()
        .filter_map(Value::as_str)
        .find_map(RiasecCode::from_tag)
}
