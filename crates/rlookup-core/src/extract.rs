use lazy_static::lazy_static;
use regex::Regex;
use rlookup_types::WordInfo;

lazy_static! {
    /// First `**bold**` span on a single line
    static ref WORD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("word pattern is valid");

    /// `(…)` right after the bold span, on the same line
    static ref PRONUNCIATION_RE: Regex =
        Regex::new(r"^[ \t]*\((.*?)\)").expect("pronunciation pattern is valid");
}

/// Pull the headword and its pronunciation out of a completion.
///
/// The word is the leftmost bold span, in any script. A parenthesised group
/// directly after that span on the same line is the pronunciation. Returns
/// `None` when there is no non-empty bold span.
pub fn extract_word_info(completion: &str) -> Option<WordInfo> {
    let captures = WORD_RE.captures(completion)?;
    let word = captures.get(1)?.as_str();
    if word.is_empty() {
        return None;
    }

    let rest = &completion[captures.get(0)?.end()..];
    let pronunciation = PRONUNCIATION_RE
        .captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    Some(WordInfo {
        word: word.to_string(),
        pronunciation,
    })
}
