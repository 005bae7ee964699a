use osteoscan_core::models::analysis::AnalysisFindings;

use crate::error::BedrockError;

/// Strip a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line. A reply fenced on a
    // single line has no such line, only an optional tag before the payload.
    let body = match rest.split_once('\n') {
        Some((info, body)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the model's reply into findings.
///
/// Only the shape is checked here. Bounds and applicability are the
/// validator's job, so a reply with an out-of-range index still parses.
pub fn parse_findings(text: &str) -> Result<AnalysisFindings, BedrockError> {
    let json = strip_code_fence(text);
    if json.is_empty() {
        return Err(BedrockError::SchemaViolation("empty response".to_string()));
    }
    serde_json::from_str(json).map_err(|e| {
        BedrockError::SchemaViolation(format!(
            "failed to parse AnalysisFindings: {e}. Response: {text}"
        ))
    })
}
