//! Constraint extraction from free-text queries
//!
//! Extraction runs an ordered table of [`ConstraintRule`]s over the query.
//! Each rule pairs a case-insensitive pattern with the effect it has on the
//! [`ConstraintSet`].

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{AssessmentRecord, TestType};

lazy_static! {
    static ref DURATION_PATTERN: Regex =
        Regex::new(r"(?i)(\d+)\s*min(?:utes)?").expect("valid duration pattern");
    static ref COGNITIVE_PATTERN: Regex = Regex::new(r"(?i)cognitive").expect("valid pattern");
    static ref PERSONALITY_PATTERN: Regex = Regex::new(r"(?i)personality").expect("valid pattern");
    static ref KNOWLEDGE_PATTERN: Regex = Regex::new(r"(?i)knowledge").expect("valid pattern");
    static ref REMOTE_PATTERN: Regex = Regex::new(r"(?i)remote").expect("valid pattern");
}

/// Structured constraints recovered from a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Upper bound on assessment duration
    pub max_duration_minutes: Option<u32>,
    /// Empty means no category restriction
    pub required_categories: BTreeSet<TestType>,
    pub require_remote: bool,
}

impl ConstraintSet {
    /// True when no constraint is set
    pub fn is_unconstrained(&self) -> bool {
        self.max_duration_minutes.is_none()
            && self.required_categories.is_empty()
            && !self.require_remote
    }

    /// Whether a record satisfies every constraint.
    ///
    /// Unknown durations always pass; categories use OR semantics.
    pub fn admits(&self, record: &AssessmentRecord) -> bool {
        if let (Some(ceiling), Some(duration)) = (self.max_duration_minutes, record.duration_minutes) {
            if duration > ceiling {
                return false;
            }
        }
        if self.require_remote && !record.remote_testing {
            return false;
        }
        if !self.required_categories.is_empty()
            && record
                .test_types
                .intersection(&self.required_categories)
                .next()
                .is_none()
        {
            return false;
        }
        true
    }
}

/// What a matching rule does to the constraint set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Take the first capture group as a minute ceiling
    MaxDuration,
    /// Add a required category
    RequireCategory(TestType),
    /// Require remote testing support
    RequireRemote,
}

/// A named pattern and its effect
#[derive(Debug, Clone)]
pub struct ConstraintRule {
    pub name: String,
    pub pattern: Regex,
    pub effect: RuleEffect,
}

impl ConstraintRule {
    pub fn new(name: impl Into<String>, pattern: Regex, effect: RuleEffect) -> Self {
        Self {
            name: name.into(),
            pattern,
            effect,
        }
    }

    /// Rule matching a keyword anywhere in the query, ignoring case
    pub fn keyword(
        name: impl Into<String>,
        keyword: &str,
        effect: RuleEffect,
    ) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("(?i){}", regex::escape(keyword)))?;
        Ok(Self::new(name, pattern, effect))
    }

    /// Apply this rule to `query`, updating `constraints`.
    ///
    /// Returns true when the rule changed something.
    pub fn apply(&self, query: &str, constraints: &mut ConstraintSet) -> bool {
        match self.effect {
            RuleEffect::MaxDuration => {
                if constraints.max_duration_minutes.is_some() {
                    return false;
                }
                let minutes = self
                    .pattern
                    .captures_iter(query)
                    .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()));
                match minutes {
                    Some(minutes) => {
                        constraints.max_duration_minutes = Some(minutes);
                        true
                    }
                    None => false,
                }
            }
            RuleEffect::RequireCategory(category) => {
                self.pattern.is_match(query) && constraints.required_categories.insert(category)
            }
            RuleEffect::RequireRemote => {
                if self.pattern.is_match(query) && !constraints.require_remote {
                    constraints.require_remote = true;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Turns a query into a [`ConstraintSet`] by running its rule table in order
#[derive(Debug, Clone)]
pub struct ConstraintExtractor {
    rules: Vec<ConstraintRule>,
}

impl Default for ConstraintExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintExtractor {
    /// Extractor with the default rule table
    pub fn new() -> Self {
        Self {
            rules: vec![
                ConstraintRule::new("duration", DURATION_PATTERN.clone(), RuleEffect::MaxDuration),
                ConstraintRule::new(
                    "cognitive",
                    COGNITIVE_PATTERN.clone(),
                    RuleEffect::RequireCategory(TestType::Competencies),
                ),
                ConstraintRule::new(
                    "personality",
                    PERSONALITY_PATTERN.clone(),
                    RuleEffect::RequireCategory(TestType::Personality),
                ),
                ConstraintRule::new(
                    "knowledge",
                    KNOWLEDGE_PATTERN.clone(),
                    RuleEffect::RequireCategory(TestType::KnowledgeSkills),
                ),
                ConstraintRule::new("remote", REMOTE_PATTERN.clone(), RuleEffect::RequireRemote),
            ],
        }
    }

    /// Extractor with no rules; every query is unconstrained
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the table
    pub fn with_rule(mut self, rule: ConstraintRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ConstraintRule] {
        &self.rules
    }

    /// Extract constraints from a query. Never fails.
    pub fn extract(&self, query: &str) -> ConstraintSet {
        let mut constraints = ConstraintSet::default();
        for rule in &self.rules {
            if rule.apply(query, &mut constraints) {
                debug!("Constraint rule '{}' matched", rule.name);
            }
        }
        constraints
    }
}
