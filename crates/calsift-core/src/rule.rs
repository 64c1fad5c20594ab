//! Assignment rules -- match conditions binding recurring series to groups.
//!
//! A rule is either a single condition or a boolean combination (AND/OR) of
//! at least two conditions; children of a compound rule are always simple
//! conditions, never nested compounds. Condition matching is case-insensitive
//! substring containment ([`substring_match`]). Filter whitelists and
//! blacklists use exact equality instead ([`exact_match`]); the two
//! comparisons are deliberately separate functions and must stay that way.

use crate::error::{Result, SiftError};
use crate::event::{Event, GroupId};
use serde::{Deserialize, Serialize};

/// The six simple condition kinds.
///
/// Each `*_not_contains` kind is the exact logical negation of its
/// `*_contains` counterpart for every event and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    TitleContains,
    TitleNotContains,
    DescriptionContains,
    DescriptionNotContains,
    CategoryContains,
    CategoryNotContains,
}

impl ConditionKind {
    /// Whether this kind inverts its containment check.
    pub fn negated(self) -> bool {
        matches!(
            self,
            ConditionKind::TitleNotContains
                | ConditionKind::DescriptionNotContains
                | ConditionKind::CategoryNotContains
        )
    }
}

/// Case-insensitive substring containment -- the comparison rule conditions
/// use. Unicode-aware via `str::to_lowercase`.
pub fn substring_match(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Exact string equality -- the comparison filter whitelists and blacklists
/// use. A whitelist entry `"Meeting"` must not match an event titled
/// `"Meeting Room"`, so this is not [`substring_match`] and the two must not
/// be unified.
pub fn exact_match(a: &str, b: &str) -> bool {
    a == b
}

/// A single match condition against one event attribute.
///
/// Constructed via [`Condition::new`], which rejects empty values; an
/// invalid condition can never reach evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    kind: ConditionKind,
    value: String,
}

impl Condition {
    /// Build a condition.
    ///
    /// # Errors
    /// Returns [`SiftError::EmptyRuleValue`] if `value` is the empty string.
    pub fn new(kind: ConditionKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(SiftError::EmptyRuleValue);
        }
        Ok(Self { kind, value })
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Evaluate this condition against one event.
    ///
    /// Title and description kinds test the value against the attribute
    /// string (a missing description behaves as the empty string). Category
    /// kinds test each category string and succeed if any contains the
    /// value. `*_not_contains` kinds return the negation of the
    /// corresponding containment check.
    pub fn matches(&self, event: &Event) -> bool {
        let contained = match self.kind {
            ConditionKind::TitleContains | ConditionKind::TitleNotContains => {
                substring_match(&event.title, &self.value)
            }
            ConditionKind::DescriptionContains | ConditionKind::DescriptionNotContains => {
                substring_match(event.description.as_deref().unwrap_or(""), &self.value)
            }
            ConditionKind::CategoryContains | ConditionKind::CategoryNotContains => event
                .categories
                .iter()
                .any(|category| substring_match(category, &self.value)),
        };
        if self.kind.negated() {
            !contained
        } else {
            contained
        }
    }
}

/// Boolean combinator for compound rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineOp {
    /// Every child condition must match.
    #[serde(rename = "AND")]
    And,
    /// At least one child condition must match.
    #[serde(rename = "OR")]
    Or,
}

/// The matching half of an assignment rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Matcher {
    /// A single condition.
    Simple(Condition),
    /// AND/OR over two or more simple conditions. Compounds do not nest.
    Compound {
        op: CombineOp,
        conditions: Vec<Condition>,
    },
}

impl Matcher {
    /// Evaluate against one event. Each child condition is checked
    /// independently, then combined per the operator.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Matcher::Simple(condition) => condition.matches(event),
            Matcher::Compound { op, conditions } => match op {
                CombineOp::And => conditions.iter().all(|c| c.matches(event)),
                CombineOp::Or => conditions.iter().any(|c| c.matches(event)),
            },
        }
    }
}

/// A rule assigning recurring series to a group.
///
/// Rules within a domain evaluate in explicit `priority` order (lower
/// first, ties broken by `id`); the first rule matching any instance of a
/// series claims the series. Reordering rules therefore means rewriting
/// priorities, never relying on storage position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRule {
    pub id: i64,
    pub target_group: GroupId,
    pub priority: i64,
    pub matcher: Matcher,
}

impl AssignmentRule {
    /// Build a simple rule from a single condition.
    pub fn simple(id: i64, target_group: GroupId, priority: i64, condition: Condition) -> Self {
        Self {
            id,
            target_group,
            priority,
            matcher: Matcher::Simple(condition),
        }
    }

    /// Build a compound rule.
    ///
    /// # Errors
    /// Returns [`SiftError::TooFewConditions`] if fewer than two conditions
    /// are given.
    pub fn compound(
        id: i64,
        target_group: GroupId,
        priority: i64,
        op: CombineOp,
        conditions: Vec<Condition>,
    ) -> Result<Self> {
        if conditions.len() < 2 {
            return Err(SiftError::TooFewConditions {
                got: conditions.len(),
            });
        }
        Ok(Self {
            id,
            target_group,
            priority,
            matcher: Matcher::Compound { op, conditions },
        })
    }

    /// Evaluate this rule's matcher against one event.
    pub fn matches(&self, event: &Event) -> bool {
        self.matcher.matches(event)
    }
}
