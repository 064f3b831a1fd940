//! Extracting payloads from model output (handles markdown fences)

/// Extract the body of a fenced block, preferring a fence tagged with `lang`.
///
/// Falls back to the first bare fence, then to the trimmed content itself.
pub fn extract_block<'a>(content: &'a str, lang: &str) -> &'a str {
    let tagged = format!("```{}", lang);
    if content.contains(&tagged) {
        content
            .split(tagged.as_str())
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(content)
    } else if content.contains("```") {
        content
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(content)
    } else {
        content.trim()
    }
}

/// Strip markdown formatting from generated code
pub fn extract_code(content: &str) -> &str {
    extract_block(content, "python")
}

/// Strip markdown formatting from a JSON payload
pub fn extract_json(content: &str) -> &str {
    extract_block(content, "json")
}
