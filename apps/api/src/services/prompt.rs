/// Instruction sent to the generative model for a set of reading preferences.
///
/// The model is asked for bare JSON in the `{"recommendations": [...]}` shape;
/// the normalizer still tolerates fences and the other accepted shapes.
pub fn build_prompt(preferences: &str, count: usize) -> String {
    format!(
        r#"Based on these reading preferences: "{preferences}"

Recommend exactly {count} books. Return ONLY valid JSON in this exact format, no markdown or extra text:
{{
    "recommendations": [
        {{
            "title": "Book Title",
            "author": "Author Name",
            "reason": "Brief explanation why this book matches the preferences (2-3 sentences)"
        }}
    ]
}}"#,
        preferences = preferences.trim(),
        count = count,
    )
}
