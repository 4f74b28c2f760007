//! Strict-JSON support for models without a native JSON response mode.
//!
//! Converse has no `response_format` switch, so strict-JSON requests carry an
//! extra system instruction and the reply is trimmed down to the outermost
//! JSON object before it is handed back.

pub const STRICT_JSON_INSTRUCTION: &str = "\
Respond with a single JSON object and nothing else. \
Do not wrap it in code fences and do not add commentary before or after it.";

/// Return the outermost `{...}` span of `text`, skipping code fences or
/// chatter around it. `None` if the text contains no object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
