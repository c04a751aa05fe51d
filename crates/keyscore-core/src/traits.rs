//! Core trait definitions.
//!
//! The scoring engine depends on two string-matching capabilities and never
//! on a concrete policy. [`crate::text::StandardMatcher`] is the shipped
//! implementation; hosts with their own notion of word boundaries or spelling
//! tolerance implement [`TextMatcher`] and hand it to
//! [`crate::engine::ScoreEngine::with_matcher`].

/// String-matching capabilities consumed by the scoring engine.
pub trait TextMatcher: Send + Sync {
    /// True if `needle` occurs in `haystack` bounded by non-word characters
    /// or string edges on both sides, i.e. not as a fragment of a longer word.
    fn is_isolated(&self, needle: &str, haystack: &str) -> bool;

    /// True if some contiguous span of `haystack` approximately equals
    /// `needle`. The tolerance is up to the implementation.
    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool;
}

impl<T: TextMatcher + ?Sized> TextMatcher for &T {
    fn is_isolated(&self, needle: &str, haystack: &str) -> bool {
        (**self).is_isolated(needle, haystack)
    }

    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool {
        (**self).fuzzy_contains(needle, haystack)
    }
}

impl<T: TextMatcher + ?Sized> TextMatcher for Box<T> {
    fn is_isolated(&self, needle: &str, haystack: &str) -> bool {
        (**self).is_isolated(needle, haystack)
    }

    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool {
        (**self).fuzzy_contains(needle, haystack)
    }
}
