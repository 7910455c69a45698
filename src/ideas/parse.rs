use crate::foundation::error::{MemeError, MemeResult};
use crate::model::idea::{Idea, IdeaBatch};

/// Strip a ```` ```json ```` or bare ```` ``` ```` fence wrapped around a model payload.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse an `{ "ideas": [...] }` payload. Partial structures are rejected as a whole.
pub fn parse_idea_batch(text: &str) -> MemeResult<Vec<Idea>> {
    let body = strip_json_fences(text);
    if body.is_empty() {
        return Err(MemeError::request("empty idea payload"));
    }
    let batch: IdeaBatch = serde_json::from_str(body)
        .map_err(|e| MemeError::request(format!("malformed idea payload: {e}")))?;
    Ok(batch.ideas)
}

#[cfg(test)]
#[path = "../../tests/unit/ideas/parse.rs"]
mod tests;
