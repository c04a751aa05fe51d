//! Core data model types for keyscore.
//!
//! These types describe what a response is graded against (keyword groups
//! and their alternatives) and what grading produces.

use serde::{Deserialize, Serialize};

/// Per-alternative matching options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Compare the phrase against the input without lowercasing either side.
    #[serde(default, alias = "caseSensitive")]
    pub case_sensitive: bool,
    /// Fall back to approximate matching when no exact match is found.
    #[serde(default, alias = "forgiveMistakes")]
    pub forgive_mistakes: bool,
}

/// One acceptable wording for a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAlternative {
    /// The phrase to look for.
    #[serde(rename = "alternative")]
    pub phrase: String,
    #[serde(default)]
    pub options: MatchOptions,
}

impl KeywordAlternative {
    pub fn new(phrase: impl Into<String>, options: MatchOptions) -> Self {
        Self {
            phrase: phrase.into(),
            options,
        }
    }

    /// A case-insensitive alternative that must match exactly.
    pub fn exact(phrase: impl Into<String>) -> Self {
        Self::new(phrase, MatchOptions::default())
    }
}

/// One scorable concept: a point value and the phrasings that earn it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Alternatives, evaluated in declaration order.
    #[serde(default)]
    pub alternatives: Vec<KeywordAlternative>,
    /// Points awarded when any alternative matches.
    pub points: u32,
}

/// Everything a response is graded against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Keyword groups, evaluated in order.
    #[serde(default)]
    pub groups: Vec<KeywordGroup>,
    /// Overall feedback template; `@score` and `@total` are substituted.
    #[serde(default)]
    pub feedback: Option<String>,
}

impl ScoringConfig {
    pub fn new(groups: Vec<KeywordGroup>) -> Self {
        Self {
            groups,
            feedback: None,
        }
    }

    /// Sum of every group's point value.
    pub fn max_possible(&self) -> u64 {
        self.groups.iter().map(|g| u64::from(g.points)).sum()
    }
}

/// How an alternative was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// The alternative that earned a group its points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedAlternative {
    /// Position of the alternative within its group.
    pub index: usize,
    pub phrase: String,
    pub kind: MatchKind,
}

/// The result of evaluating one keyword group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    /// Position of the group within the config.
    pub index: usize,
    /// Points the group is worth.
    pub points: u32,
    /// Points actually awarded: either 0 or `points`.
    pub awarded: u32,
    #[serde(default)]
    pub matched: Option<MatchedAlternative>,
}

/// The result of scoring one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Points awarded across all groups.
    pub total: u64,
    /// Sum of all group point values.
    pub max_possible: u64,
    /// Per-group outcomes, in config order.
    #[serde(default)]
    pub groups: Vec<GroupOutcome>,
}

impl ScoreResult {
    /// Fraction of the achievable score that was awarded, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max_possible == 0 {
            0.0
        } else {
            self.total as f64 / self.max_possible as f64
        }
    }

    /// Outcomes of the groups that scored.
    pub fn matched_groups(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.groups.iter().filter(|g| g.matched.is_some())
    }

    /// Render a feedback template, replacing `@score` and `@total`.
    pub fn feedback(&self, template: &str) -> String {
        template
            .replace("@score", &self.total.to_string())
            .replace("@total", &self.max_possible.to_string())
    }
}

/// Persisted state of the input widget, restored by the host on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Verbatim content of the input field.
    #[serde(default)]
    pub text: String,
}

impl SessionState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total: u64, max_possible: u64) -> ScoreResult {
        ScoreResult {
            total,
            max_possible,
            groups: vec![],
        }
    }

    #[test]
    fn max_possible_sums_points() {
        let config = ScoringConfig::new(vec![
            KeywordGroup {
                alternatives: vec![KeywordAlternative::exact("sun")],
                points: 5,
            },
            KeywordGroup {
                alternatives: vec![],
                points: 3,
            },
        ]);
        assert_eq!(config.max_possible(), 8);
        assert_eq!(ScoringConfig::default().max_possible(), 0);
    }

    #[test]
    fn ratio_handles_zero_max() {
        assert_eq!(result(0, 0).ratio(), 0.0);
        assert!((result(3, 4).ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn feedback_placeholders() {
        let text = result(5, 8).feedback("You got @score of @total points");
        assert_eq!(text, "You got 5 of 8 points");
    }

    #[test]
    fn alternative_accepts_camel_case_options() {
        let json = r#"{"alternative": "Paris", "options": {"caseSensitive": true, "forgiveMistakes": true}}"#;
        let alt: KeywordAlternative = serde_json::from_str(json).unwrap();
        assert_eq!(alt.phrase, "Paris");
        assert!(alt.options.case_sensitive);
        assert!(alt.options.forgive_mistakes);
    }

    #[test]
    fn alternative_options_default_off() {
        let alt: KeywordAlternative = serde_json::from_str(r#"{"alternative": "cat"}"#).unwrap();
        assert_eq!(alt.options, MatchOptions::default());
    }

    #[test]
    fn session_state_shape() {
        let state = SessionState::new("The sun\nrises");
        let json = state.to_json().unwrap();
        assert_eq!(json, r#"{"text":"The sun\nrises"}"#);
        assert_eq!(SessionState::from_json(&json).unwrap(), state);
        assert_eq!(SessionState::from_json("{}").unwrap().text, "");
    }
}
