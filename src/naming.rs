//! Filesystem-safe name normalization.

/// Maps remote file and folder names to portable local names.
///
/// The rules are plain data held by the normalizer: a set of non-alphanumeric
/// characters that pass through unchanged, and the replacement used for
/// everything else.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    allowed_extra: String,
    replacement: char,
}

impl NameNormalizer {
    /// Create a normalizer with the default rules: alphanumerics plus
    /// hyphen, underscore, period and space survive, everything else
    /// becomes a hyphen.
    pub fn new() -> Self {
        Self::with_rules("-_. ", '-')
    }

    /// Create a normalizer with explicit rules.
    pub fn with_rules(allowed_extra: &str, replacement: char) -> Self {
        Self {
            allowed_extra: allowed_extra.to_string(),
            replacement,
        }
    }

    /// Map a remote name to a filesystem-safe local name.
    ///
    /// Each character is mapped independently, so the output always has the
    /// same number of characters as the input.
    pub fn normalize(&self, name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() || self.allowed_extra.contains(c) {
                    c
                } else {
                    self.replacement
                }
            })
            .collect()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_names_pass_through() {
        let n = NameNormalizer::new();
        assert_eq!(n.normalize("report v2_final.pdf"), "report v2_final.pdf");
        assert_eq!(n.normalize("photo-01.jpg"), "photo-01.jpg");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let n = NameNormalizer::new();
        assert_eq!(n.normalize("weird:name*.pdf"), "weird-name-.pdf");
        assert_eq!(n.normalize("a/b\\c"), "a-b-c");
        assert_eq!(n.normalize("res:lt?"), "res-lt-");
    }

    #[test]
    fn test_length_preserved() {
        let n = NameNormalizer::new();
        for name in ["weird:name*.pdf", "***", "a b\tc", "ünïcødé!"] {
            assert_eq!(n.normalize(name).chars().count(), name.chars().count());
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(NameNormalizer::new().normalize(""), "");
    }

    #[test]
    fn test_custom_rules() {
        let n = NameNormalizer::with_rules("_", '_');
        assert_eq!(n.normalize("a-b c"), "a_b_c");
    }
}
