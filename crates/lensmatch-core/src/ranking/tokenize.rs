//! Label and field tokenization.

/// Split text into lower-cased word tokens.
///
/// Splits on runs of whitespace and commas, so classifier labels such as
/// `"tabby, tabby cat"` become `["tabby", "tabby", "cat"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize, prefixing the output with the whole lower-cased phrase.
///
/// The whole phrase lets multi-word values ("coffee mug") match as a unit
/// before falling back to per-word tokens. A single-word phrase is emitted
/// once, and an empty phrase yields no tokens.
pub fn tokenize_with_whole(text: &str) -> Vec<String> {
    let whole = text.trim().to_lowercase();
    if whole.is_empty() {
        return Vec::new();
    }

    let words = tokenize(&whole);
    if words.len() == 1 && words[0] == whole {
        return words;
    }

    let mut tokens = Vec::with_capacity(words.len() + 1);
    tokens.push(whole);
    tokens.extend(words);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Coffee Mug"), vec!["coffee", "mug"]);
    }

    #[test]
    fn test_tokenize_splits_on_comma_runs() {
        assert_eq!(
            tokenize("tabby, tabby cat,,  Egyptian"),
            vec!["tabby", "tabby", "cat", "egyptian"]
        );
    }

    #[test]
    fn test_tokenize_drops_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,  , ").is_empty());
    }

    #[test]
    fn test_tokenize_handles_tabs_and_newlines() {
        assert_eq!(tokenize("espresso\tmaker\nsteel"), vec!["espresso", "maker", "steel"]);
    }

    #[test]
    fn test_tokenize_with_whole_prefixes_phrase() {
        assert_eq!(
            tokenize_with_whole("Coffee Mug"),
            vec!["coffee mug", "coffee", "mug"]
        );
    }

    #[test]
    fn test_tokenize_with_whole_single_word_not_duplicated() {
        assert_eq!(tokenize_with_whole("Kettle"), vec!["kettle"]);
        assert_eq!(tokenize_with_whole("  kettle "), vec!["kettle"]);
    }

    #[test]
    fn test_tokenize_with_whole_empty() {
        assert!(tokenize_with_whole("   ").is_empty());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Water bottle, stainless";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
