//! Text normalization and the standard matching policy.

use crate::traits::TextMatcher;

/// Normalize raw response text before matching.
///
/// Line breaks (`\r\n`, `\r`, `\n`) become a single space. Afterwards one
/// left-to-right pass replaces each pair of consecutive whitespace characters
/// with one space. Pairs do not overlap, so `"a   b"` becomes `"a  b"`.
pub fn normalize(raw: &str) -> String {
    let mut joined = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                joined.push(' ');
            }
            '\n' => joined.push(' '),
            _ => joined.push(c),
        }
    }

    let mut out = String::with_capacity(joined.len());
    let mut chars = joined.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.next_if(|n| n.is_whitespace()).is_some() {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// How many spelling mistakes a fuzzy match forgives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyTolerance {
    /// One edit is allowed per this many characters of the needle.
    pub chars_per_edit: usize,
    /// Upper bound on allowed edits, regardless of needle length.
    pub max_edits: usize,
}

impl Default for FuzzyTolerance {
    fn default() -> Self {
        Self {
            chars_per_edit: 4,
            max_edits: 3,
        }
    }
}

impl FuzzyTolerance {
    /// Edits allowed for a needle of `len` characters.
    pub fn allowed_edits(&self, len: usize) -> usize {
        if self.chars_per_edit == 0 {
            return 0;
        }
        (len / self.chars_per_edit).min(self.max_edits)
    }
}

/// Word-boundary isolation plus Damerau-Levenshtein fuzzy search.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMatcher {
    tolerance: FuzzyTolerance,
}

impl StandardMatcher {
    pub fn new(tolerance: FuzzyTolerance) -> Self {
        Self { tolerance }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip punctuation hugging a token, e.g. `"moonn,"` -> `"moonn"`.
fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !is_word_char(c))
}

impl TextMatcher for StandardMatcher {
    fn is_isolated(&self, needle: &str, haystack: &str) -> bool {
        if needle.is_empty() {
            return false;
        }

        haystack.char_indices().any(|(start, _)| {
            if !haystack[start..].starts_with(needle) {
                return false;
            }
            let end = start + needle.len();
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
    }

    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool {
        let needle_words: Vec<&str> = needle.split_whitespace().collect();
        if needle_words.is_empty() {
            return false;
        }
        let needle = needle_words.join(" ");
        let allowed = self.tolerance.allowed_edits(needle.chars().count());

        let tokens: Vec<&str> = haystack
            .split_whitespace()
            .map(trim_token)
            .filter(|t| !t.is_empty())
            .collect();

        let n = needle_words.len();
        let widths = n.saturating_sub(1).max(1)..=n + 1;
        widths.into_iter().any(|width| {
            tokens.windows(width).any(|window| {
                let candidate = window.join(" ");
                strsim::damerau_levenshtein(&needle, &candidate) <= allowed
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_line_breaks() {
        assert_eq!(normalize("Hello\r\nworld"), "Hello world");
        assert_eq!(normalize("Hello\rworld"), "Hello world");
        assert_eq!(normalize("Hello\nworld"), "Hello world");
    }

    #[test]
    fn normalize_collapses_one_pair_per_run() {
        assert_eq!(normalize("a  b"), "a b");
        assert_eq!(normalize("a   b"), "a  b");
        assert_eq!(normalize("a    b"), "a  b");
    }

    #[test]
    fn normalize_blank_line_between_paragraphs() {
        assert_eq!(normalize("one\r\n\r\ntwo"), "one two");
        assert_eq!(normalize("one\n\n\ntwo"), "one  two");
    }

    #[test]
    fn normalize_leaves_input_untouched() {
        let raw = String::from("keep\nme");
        let normalized = normalize(&raw);
        assert_eq!(raw, "keep\nme");
        assert_eq!(normalized, "keep me");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn isolated_whole_words() {
        let m = StandardMatcher::default();
        assert!(m.is_isolated("cat", "the cat sat"));
        assert!(m.is_isolated("cat", "cat"));
        assert!(m.is_isolated("cat", "a cat."));
        assert!(!m.is_isolated("cat", "category"));
        assert!(!m.is_isolated("cat", "concat"));
        assert!(!m.is_isolated("cat", "cat_food"));
    }

    #[test]
    fn isolated_checks_every_occurrence() {
        let m = StandardMatcher::default();
        assert!(m.is_isolated("cat", "category and cat"));
    }

    #[test]
    fn isolated_phrases_and_unicode() {
        let m = StandardMatcher::default();
        assert!(m.is_isolated("hello world", "say hello world!"));
        assert!(m.is_isolated("café", "un café noir"));
        assert!(!m.is_isolated("caf", "un café noir"));
        assert!(!m.is_isolated("", "anything"));
    }

    #[test]
    fn fuzzy_forgives_small_typos() {
        let m = StandardMatcher::default();
        assert!(m.fuzzy_contains("necessary", "it is neccessary to act"));
        assert!(m.fuzzy_contains("moon", "the sun and the moonn shine"));
        assert!(m.fuzzy_contains("receive", "did you recieve it?"));
    }

    #[test]
    fn fuzzy_short_words_must_be_exact() {
        let m = StandardMatcher::default();
        assert!(!m.fuzzy_contains("cat", "the cot sat"));
        assert!(m.fuzzy_contains("cat", "the cat, sat"));
        assert!(!m.fuzzy_contains("cat", "category"));
    }

    #[test]
    fn fuzzy_multi_word_phrases() {
        let m = StandardMatcher::default();
        assert!(m.fuzzy_contains("ice cream", "i like icecream a lot"));
        assert!(m.fuzzy_contains("solar system", "our solar sytem is big"));
        assert!(!m.fuzzy_contains("solar system", "our lunar orbit is big"));
    }

    #[test]
    fn fuzzy_rejects_empty_needle() {
        let m = StandardMatcher::default();
        assert!(!m.fuzzy_contains("", "anything"));
        assert!(!m.fuzzy_contains("   ", "anything"));
        assert!(!m.fuzzy_contains("word", ""));
    }

    #[test]
    fn tolerance_scales_with_length() {
        let t = FuzzyTolerance::default();
        assert_eq!(t.allowed_edits(3), 0);
        assert_eq!(t.allowed_edits(4), 1);
        assert_eq!(t.allowed_edits(9), 2);
        assert_eq!(t.allowed_edits(40), 3);

        let strict = StandardMatcher::new(FuzzyTolerance {
            chars_per_edit: 0,
            max_edits: 0,
        });
        assert!(!strict.fuzzy_contains("necessary", "neccessary"));
    }
}
