//! Normalization of raw model results into reply text.

use serde_json::Value;

/// Resolve a model result to plain text.
///
/// Prefers a non-null `content` field, then `text`, then the result itself.
/// Strings are trimmed; anything else becomes its compact JSON text.
pub fn normalize_reply(result: &Value) -> String {
    let resolved = [result.get("content"), result.get("text")]
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .unwrap_or(result);

    match resolved {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
