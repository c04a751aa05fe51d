//! The scoring engine.
//!
//! Evaluates every keyword group of a [`ScoringConfig`] against a response
//! and sums the points of the groups that matched. Within a group the first
//! matching alternative wins, so a group never contributes more than once.

use crate::model::{
    GroupOutcome, KeywordAlternative, KeywordGroup, MatchKind, MatchedAlternative, ScoreResult,
    ScoringConfig,
};
use crate::text::{normalize, StandardMatcher};
use crate::traits::TextMatcher;

/// Score `input` against `config` with the standard matcher.
pub fn score(input: &str, config: &ScoringConfig) -> ScoreResult {
    let matcher = StandardMatcher::default();
    let normalized = NormalizedInput::new(input);
    let groups = evaluate_groups(&config.groups, &normalized, &matcher);
    ScoreResult {
        total: groups.iter().map(|g| u64::from(g.awarded)).sum(),
        max_possible: config.max_possible(),
        groups,
    }
}

/// A scoring engine bound to one configuration.
///
/// `max_possible` is computed once at construction. The engine holds no
/// mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ScoreEngine<M = StandardMatcher> {
    config: ScoringConfig,
    max_possible: u64,
    matcher: M,
}

impl ScoreEngine<StandardMatcher> {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_matcher(config, StandardMatcher::default())
    }
}

impl<M: TextMatcher> ScoreEngine<M> {
    /// Build an engine that uses a custom matching policy.
    pub fn with_matcher(config: ScoringConfig, matcher: M) -> Self {
        let max_possible = config.max_possible();
        tracing::debug!(
            groups = config.groups.len(),
            max_possible,
            "score engine configured"
        );
        Self {
            config,
            max_possible,
            matcher,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn max_possible(&self) -> u64 {
        self.max_possible
    }

    /// Score one response.
    pub fn score(&self, input: &str) -> ScoreResult {
        let normalized = NormalizedInput::new(input);
        let groups = evaluate_groups(&self.config.groups, &normalized, &self.matcher);
        let total = groups.iter().map(|g| u64::from(g.awarded)).sum();
        tracing::debug!(total, max_possible = self.max_possible, "response scored");
        ScoreResult {
            total,
            max_possible: self.max_possible,
            groups,
        }
    }
}

/// The normalized response plus its lowercase variant.
struct NormalizedInput {
    text: String,
    lower: String,
}

impl NormalizedInput {
    fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let lower = text.to_lowercase();
        Self { text, lower }
    }
}

fn evaluate_groups(
    groups: &[KeywordGroup],
    input: &NormalizedInput,
    matcher: &dyn TextMatcher,
) -> Vec<GroupOutcome> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let matched = group
                .alternatives
                .iter()
                .enumerate()
                .find_map(|(alt_index, alt)| {
                    match_alternative(alt, input, matcher).map(|kind| MatchedAlternative {
                        index: alt_index,
                        phrase: alt.phrase.clone(),
                        kind,
                    })
                });

            let awarded = if matched.is_some() { group.points } else { 0 };
            if let Some(m) = &matched {
                tracing::debug!(
                    group = index,
                    phrase = %m.phrase,
                    kind = ?m.kind,
                    points = group.points,
                    "keyword group matched"
                );
            }

            GroupOutcome {
                index,
                points: group.points,
                awarded,
                matched,
            }
        })
        .collect()
}

fn match_alternative(
    alt: &KeywordAlternative,
    input: &NormalizedInput,
    matcher: &dyn TextMatcher,
) -> Option<MatchKind> {
    let lowered;
    let (phrase, haystack) = if alt.options.case_sensitive {
        (alt.phrase.as_str(), input.text.as_str())
    } else {
        lowered = alt.phrase.to_lowercase();
        (lowered.as_str(), input.lower.as_str())
    };

    if haystack.contains(phrase) && matcher.is_isolated(phrase, haystack) {
        return Some(MatchKind::Exact);
    }

    if alt.options.forgive_mistakes && matcher.fuzzy_contains(phrase, haystack) {
        return Some(MatchKind::Fuzzy);
    }

    tracing::trace!(phrase = %alt.phrase, "alternative did not match");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchOptions;

    fn alt(phrase: &str, case_sensitive: bool, forgive_mistakes: bool) -> KeywordAlternative {
        KeywordAlternative::new(
            phrase,
            MatchOptions {
                case_sensitive,
                forgive_mistakes,
            },
        )
    }

    fn group(points: u32, alternatives: Vec<KeywordAlternative>) -> KeywordGroup {
        KeywordGroup {
            alternatives,
            points,
        }
    }

    fn single(alternative: KeywordAlternative) -> ScoringConfig {
        ScoringConfig::new(vec![group(1, vec![alternative])])
    }

    #[test]
    fn empty_config_scores_zero() {
        let config = ScoringConfig::default();
        for input in ["", "anything at all", "sun moon"] {
            let result = score(input, &config);
            assert_eq!(result.total, 0);
            assert_eq!(result.max_possible, 0);
            assert!(result.groups.is_empty());
        }
    }

    #[test]
    fn empty_alternatives_never_match() {
        let config = ScoringConfig::new(vec![group(4, vec![])]);
        let result = score("whatever", &config);
        assert_eq!(result.total, 0);
        assert_eq!(result.max_possible, 4);
        assert!(result.groups[0].matched.is_none());
    }

    #[test]
    fn group_counts_once() {
        let config = ScoringConfig::new(vec![group(
            2,
            vec![
                alt("red", false, false),
                alt("RED", false, false),
                alt("red apple", false, true),
            ],
        )]);
        let result = score("a red apple, very red", &config);
        assert_eq!(result.total, 2);
        let matched = result.groups[0].matched.as_ref().unwrap();
        assert_eq!(matched.index, 0);
        assert_eq!(matched.kind, MatchKind::Exact);
    }

    #[test]
    fn first_matching_alternative_wins() {
        let config = ScoringConfig::new(vec![group(
            1,
            vec![alt("dog", false, false), alt("cat", false, false)],
        )]);
        let result = score("the cat sat", &config);
        let matched = result.groups[0].matched.as_ref().unwrap();
        assert_eq!(matched.index, 1);
        assert_eq!(matched.phrase, "cat");
    }

    #[test]
    fn max_possible_ignores_input() {
        let config = ScoringConfig::new(vec![
            group(5, vec![alt("sun", false, false)]),
            group(3, vec![alt("moon", false, false)]),
            group(0, vec![alt("star", false, false)]),
        ]);
        assert_eq!(score("", &config).max_possible, 8);
        assert_eq!(score("sun moon star", &config).max_possible, 8);
    }

    #[test]
    fn case_insensitive_match() {
        let config = single(alt("Paris", false, false));
        assert_eq!(score("i live in paris", &config).total, 1);
    }

    #[test]
    fn case_sensitive_match() {
        let config = single(alt("Paris", true, false));
        assert_eq!(score("i live in paris", &config).total, 0);
        assert_eq!(score("i live in Paris", &config).total, 1);
    }

    #[test]
    fn exact_match_requires_isolation() {
        let config = single(alt("cat", false, false));
        assert_eq!(score("category", &config).total, 0);
        assert_eq!(score("the cat sat", &config).total, 1);
    }

    #[test]
    fn fuzzy_only_when_forgiving() {
        let forgiving = single(alt("necessary", false, true));
        let strict = single(alt("necessary", false, false));
        let input = "it is neccessary to rest";

        let result = score(input, &forgiving);
        assert_eq!(result.total, 1);
        assert_eq!(
            result.groups[0].matched.as_ref().unwrap().kind,
            MatchKind::Fuzzy
        );
        assert_eq!(score(input, &strict).total, 0);
    }

    #[test]
    fn sun_and_moon_scenario() {
        let config = ScoringConfig::new(vec![
            group(5, vec![alt("sun", false, false)]),
            group(3, vec![alt("moon", false, true)]),
        ]);
        let result = score("The Sun and the Moonn shine", &config);
        assert_eq!(result.total, 8);
        assert_eq!(result.max_possible, 8);
        assert_eq!(result.groups[0].matched.as_ref().unwrap().kind, MatchKind::Exact);
        assert_eq!(result.groups[1].matched.as_ref().unwrap().kind, MatchKind::Fuzzy);
    }

    #[test]
    fn line_breaks_join_phrases() {
        let config = single(alt("hello world", false, false));
        assert_eq!(score("Hello\r\nworld", &config).total, 1);
        assert_eq!(score("Hello\r\n\r\nworld", &config).total, 1);
    }

    #[test]
    fn long_whitespace_runs_are_only_halved() {
        let config = single(alt("a b", false, false));
        assert_eq!(score("a  b", &config).total, 1);
        assert_eq!(score("a   b", &config).total, 0);
    }

    #[test]
    fn empty_input_scores_zero() {
        let config = single(alt("sun", false, true));
        let result = score("", &config);
        assert_eq!(result.total, 0);
        assert_eq!(result.max_possible, 1);
    }

    #[test]
    fn engine_matches_free_function() {
        let config = ScoringConfig::new(vec![
            group(5, vec![alt("sun", false, false)]),
            group(3, vec![alt("moon", false, true)]),
        ]);
        let engine = ScoreEngine::new(config.clone());
        assert_eq!(engine.max_possible(), 8);
        for input in ["", "sun", "The Sun and the Moonn shine", "moon"] {
            assert_eq!(engine.score(input), score(input, &config));
        }
    }

    struct NeverMatcher;

    impl TextMatcher for NeverMatcher {
        fn is_isolated(&self, _: &str, _: &str) -> bool {
            false
        }
        fn fuzzy_contains(&self, _: &str, _: &str) -> bool {
            false
        }
    }

    #[test]
    fn custom_matcher_is_consulted() {
        let engine = ScoreEngine::with_matcher(single(alt("sun", false, true)), NeverMatcher);
        assert_eq!(engine.score("sun").total, 0);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(ScoreEngine::new(single(alt("sun", false, false))));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || engine.score("the sun").total)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
