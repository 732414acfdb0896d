use super::vocabulary::{NEGATIVE_TONE_FLAGS, POSITIVE_TONE_WORDS};

pub const POSITIVE_MARKER: &str = "positive";
pub const CAUTION_MARKER: &str = "caution";

/// Whitespace-delimited token count of the trimmed answer.
pub fn count_words(answer: &str) -> usize {
    answer.split_whitespace().count()
}

/// Terms contained in `answer`, compared case-insensitively as raw substrings.
///
/// Matches come back in declaration order with their declared spelling, at most once each.
/// There is no word-boundary check, so `"art"` matches inside `"started"`.
pub fn match_keywords<'a, S: AsRef<str>>(answer: &str, keywords: &'a [S]) -> Vec<&'a str> {
    let haystack = answer.trim().to_lowercase();
    keywords
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|keyword| {
            let needle = keyword.to_lowercase();
            !needle.is_empty() && haystack.contains(&needle)
        })
        .collect()
}

/// Tone diagnostics: at most one `positive: ...` and one `caution: ...` entry.
pub fn detect_tone(answer: &str) -> Vec<String> {
    let positives = match_keywords(answer, POSITIVE_TONE_WORDS);
    let negatives = match_keywords(answer, NEGATIVE_TONE_FLAGS);

    let mut signals = Vec::new();
    if !positives.is_empty() {
        signals.push(format!("{POSITIVE_MARKER}: {}", positives.join(", ")));
    }
    if !negatives.is_empty() {
        signals.push(format!("{CAUTION_MARKER}: {}", negatives.join(", ")));
    }
    signals
}
