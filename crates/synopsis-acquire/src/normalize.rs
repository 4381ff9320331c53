use unicode_normalization::UnicodeNormalization;

/// Normalize extracted synopsis text.
///
/// Converts to NFC so accented titles and names compare consistently, and
/// folds every whitespace run (including line breaks left over from the HTML
/// source layout) into a single space. Leading and trailing whitespace is dropped.
pub fn normalize_synopsis(input: &str) -> String {
    let nfc: String = input.nfc().collect();

    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        // e + combining acute accent -> é (precomposed)
        let decomposed = "Am\u{0065}\u{0301}lie";
        assert_eq!(normalize_synopsis(decomposed), "Amélie");
    }

    #[test]
    fn test_trims_and_collapses() {
        let input = "\n        A cowboy doll is profoundly threatened\n        and jealous   when a new spaceman figure supplants him.\n    ";
        assert_eq!(
            normalize_synopsis(input),
            "A cowboy doll is profoundly threatened and jealous when a new spaceman figure supplants him."
        );
    }

    #[test]
    fn test_blank() {
        assert_eq!(normalize_synopsis(" \n\t "), "");
    }
}
