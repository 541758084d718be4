/// Wraps the raw input in the classification instruction sent to the model.
pub fn build_prompt(text: &str) -> String {
    format!("Classify the sentiment as Positive, Negative, or Neutral: '{text}'")
}

/// First whitespace-delimited token of the model output, or `None` when the
/// output is blank. The token is not checked against the category names.
pub fn extract_label(raw: &str) -> Option<&str> {
    raw.split_whitespace().next()
}
