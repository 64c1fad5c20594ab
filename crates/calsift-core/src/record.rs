//! Flat wire records, validated into engine types at the boundary.
//!
//! The store and the web layer exchange rules and filters as flat rows with
//! optional fields. Everything here deserializes permissively and then
//! converts fallibly (`TryFrom`) into the strict engine types, so validation
//! happens exactly once, at construction, and the algorithms never see a
//! malformed value.

use crate::error::{Result, SiftError};
use crate::event::GroupId;
use crate::resolver::{DomainFilter, Filter, PersonalFilter};
use crate::rule::{AssignmentRule, CombineOp, Condition, ConditionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Wire shape of a single condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub kind: ConditionKind,
    pub value: String,
}

impl TryFrom<ConditionRecord> for Condition {
    type Error = SiftError;

    fn try_from(record: ConditionRecord) -> Result<Self> {
        Condition::new(record.kind, record.value)
    }
}

/// Wire shape of an assignment rule row.
///
/// A simple rule carries `kind` + `value`; a compound rule sets
/// `is_compound` and carries `operator` + `conditions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: i64,
    pub target_group: GroupId,
    pub priority: i64,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConditionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<CombineOp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionRecord>,
}

impl TryFrom<RuleRecord> for AssignmentRule {
    type Error = SiftError;

    fn try_from(record: RuleRecord) -> Result<Self> {
        if record.is_compound {
            let op = record.operator.ok_or_else(|| {
                SiftError::MalformedRule(format!("compound rule {} has no operator", record.id))
            })?;
            let conditions: Vec<Condition> = record
                .conditions
                .into_iter()
                .map(Condition::try_from)
                .collect::<Result<_>>()?;
            AssignmentRule::compound(record.id, record.target_group, record.priority, op, conditions)
        } else {
            let kind = record.kind.ok_or_else(|| {
                SiftError::MalformedRule(format!("simple rule {} has no kind", record.id))
            })?;
            let value = record.value.ok_or_else(|| {
                SiftError::MalformedRule(format!("simple rule {} has no value", record.id))
            })?;
            Ok(AssignmentRule::simple(
                record.id,
                record.target_group,
                record.priority,
                Condition::new(kind, value)?,
            ))
        }
    }
}

/// Convert a batch of rule rows, failing on the first malformed one.
pub fn rules_from_records(records: Vec<RuleRecord>) -> Result<Vec<AssignmentRule>> {
    records.into_iter().map(AssignmentRule::try_from).collect()
}

/// Wire shape of a filter row.
///
/// The scope keys discriminate the kind: `calendar` marks a personal
/// filter, `domain` a domain filter. The engine's filter types omit the
/// keys -- resolution input is already scoped by the caller -- so they
/// exist only to validate the row into exactly one [`Filter`] kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Source-calendar key; set on personal filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
    /// Domain key; set on domain filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub subscribed_event_titles: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_future_events: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscribed_group_ids: Vec<GroupId>,
    #[serde(default)]
    pub unselected_event_titles: BTreeSet<String>,
}

impl TryFrom<FilterRecord> for Filter {
    type Error = SiftError;

    fn try_from(record: FilterRecord) -> Result<Self> {
        match (&record.calendar, &record.domain) {
            (Some(_), Some(_)) => Err(SiftError::AmbiguousFilter),
            (None, None) => Err(SiftError::UnknownFilterKind),
            (Some(_), None) => {
                let created_at = record.created_at.ok_or_else(|| {
                    SiftError::MalformedFilter("personal filter has no created_at".into())
                })?;
                Ok(Filter::Personal(PersonalFilter {
                    subscribed_event_titles: record.subscribed_event_titles,
                    created_at,
                    include_future_events: record.include_future_events.unwrap_or(false),
                }))
            }
            (None, Some(_)) => Ok(Filter::Domain(DomainFilter {
                subscribed_group_ids: record.subscribed_group_ids,
                subscribed_event_titles: record.subscribed_event_titles,
                unselected_event_titles: record.unselected_event_titles,
            })),
        }
    }
}
