//! The cosmetic reveal effect
//!
//! The completion collaborator returns the full response as one atomic
//! string; "streaming" is a local display illusion. The text is split on
//! whitespace and revealed one word at a time, each partial state carrying
//! a trailing cursor glyph. The final state is the complete text with no
//! cursor.

/// Cursor glyph appended to every non-final partial state.
pub const CURSOR: &str = "▌";

/// Produce the sequence of display states for a full response text.
///
/// The last element always equals `text` exactly. Every earlier element
/// ends with the cursor glyph.
pub fn reveal_states(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![text.to_string()];
    }

    let mut states = Vec::with_capacity(words.len() + 1);
    let mut partial = String::new();
    for word in &words {
        if !partial.is_empty() {
            partial.push(' ');
        }
        partial.push_str(word);
        states.push(format!("{partial}{CURSOR}"));
    }
    // Commit the original text untouched, not the whitespace-normalized
    // accumulation.
    states.push(text.to_string());
    states
}
