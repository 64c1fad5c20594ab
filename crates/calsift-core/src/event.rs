//! Event instances, groups, and title helpers.
//!
//! An [`Event`] is one concrete occurrence as delivered by the ingestion
//! layer. Instances of a recurring series share a `title`; classification
//! and whitelist membership operate on titles, never on `uid`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single calendar event instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier of this instance.
    pub uid: String,
    /// Summary line shared by all instances of a recurring series.
    pub title: String,
    /// Free-text description, if the source carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category strings extracted from the source format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Start of the instance.
    pub start: DateTime<Utc>,
    /// End of the instance.
    pub end: DateTime<Utc>,
    /// When this system first ingested the instance -- not when the source
    /// calendar says it occurs. `None` for records that predate
    /// ingestion-time tracking; such records stay visible in frozen
    /// snapshots (see [`crate::resolver::resolve_personal`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Identifier of an organizational group within a domain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An organizational group an operator sorts recurring series into.
///
/// Lifecycle (create, rename, delete with cascade removal of rules and
/// manual assignments) belongs to the persistence collaborator; the engine
/// only reads groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// Collect the distinct recurring-series titles present in `events`.
///
/// Returned sorted and deduplicated; the classifier and the grouped view
/// both iterate this set so their output order is deterministic.
pub fn distinct_titles(events: &[Event]) -> BTreeSet<String> {
    events.iter().map(|e| e.title.clone()).collect()
}
