use std::collections::HashSet;

/// Normalize a comma separated word list as typed by a puzzle author.
pub fn normalize_words(raw: &str) -> Vec<String> {
    normalize_word_list(raw.split(','))
}

/// Trim and uppercase each entry, dropping empties and repeats.
/// First occurrence order is kept.
pub fn normalize_word_list<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_uppercase())
        .filter(|word| !word.is_empty())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// First word holding anything other than `A`-`Z`. Grid cells can only
/// hold uppercase ASCII letters, so such a word can't be placed.
pub fn find_invalid_word(words: &[String]) -> Option<&str> {
    words
        .iter()
        .map(String::as_str)
        .find(|word| !word.bytes().all(|b| b.is_ascii_uppercase()))
}
