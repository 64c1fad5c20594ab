//! Title classification -- resolves which group each recurring series
//! belongs to.
//!
//! Manual assignments win unconditionally; everything else walks the rules
//! in explicit priority order, first match wins. A series matches a rule if
//! any of its instances does. Titles claimed by no assignment stay out of
//! the map and surface later as ungrouped.

use crate::event::{distinct_titles, Event, GroupId};
use crate::rule::AssignmentRule;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Operator-pinned assignment of one recurring series to a group.
///
/// Not a rule: it bypasses rule evaluation entirely for its title, so
/// first-match-wins never arbitrates between a pin and a rule. The engine
/// runs per domain; scoping the tuple to a domain is the store's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAssignment {
    pub title: String,
    pub group: GroupId,
}

/// Result of classification: each recurring title mapped to at most one
/// group.
///
/// Backed by ordered maps so iteration -- and therefore every downstream
/// view -- is deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    by_group: BTreeMap<GroupId, BTreeSet<String>>,
    by_title: BTreeMap<String, GroupId>,
}

impl Classification {
    /// True when no title was assigned to any group.
    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// The group a title was assigned to, if any.
    pub fn group_of(&self, title: &str) -> Option<GroupId> {
        self.by_title.get(title).copied()
    }

    /// The titles assigned to one group, if it claimed any.
    pub fn titles_in(&self, group: GroupId) -> Option<&BTreeSet<String>> {
        self.by_group.get(&group)
    }

    /// Union of the titles assigned to any of the given groups -- the
    /// `group_titles` set of domain-filter resolution. Unknown group ids
    /// contribute nothing.
    pub fn titles_in_any(&self, groups: &[GroupId]) -> BTreeSet<String> {
        groups
            .iter()
            .filter_map(|group| self.by_group.get(group))
            .flat_map(|titles| titles.iter().cloned())
            .collect()
    }

    /// Iterate groups with their assigned title sets, ordered by group id.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &BTreeSet<String>)> {
        self.by_group.iter().map(|(id, titles)| (*id, titles))
    }

    fn insert(&mut self, title: String, group: GroupId) {
        self.by_group.entry(group).or_default().insert(title.clone());
        self.by_title.insert(title, group);
    }
}

/// Assign every distinct title in `events` to at most one group.
///
/// For each title:
///
/// 1. A [`ManualAssignment`] for the title settles it -- no rule runs.
///    Should the input carry duplicate pins for one title, the first in
///    input order counts (the store enforces uniqueness; the engine stays
///    total).
/// 2. Otherwise rules are walked ordered by `(priority, id)`; the first
///    rule matching *any* instance of the series claims the title and the
///    walk stops.
/// 3. Titles claimed by nobody are absent from the result.
///
/// Pure and deterministic: identical inputs yield identical maps. Empty
/// inputs yield an empty classification.
pub fn classify(
    events: &[Event],
    rules: &[AssignmentRule],
    manual: &[ManualAssignment],
) -> Classification {
    let titles = distinct_titles(events);

    // Instances per title, so a rule can match any instance of a series.
    let mut instances: HashMap<&str, Vec<&Event>> = HashMap::new();
    for event in events {
        instances.entry(event.title.as_str()).or_default().push(event);
    }

    let mut ordered: Vec<&AssignmentRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| (rule.priority, rule.id));

    let mut result = Classification::default();
    for title in titles {
        if let Some(pin) = manual.iter().find(|m| m.title == title) {
            result.insert(title, pin.group);
            continue;
        }

        let Some(series) = instances.get(title.as_str()) else {
            continue;
        };
        if let Some(rule) = ordered
            .iter()
            .find(|rule| series.iter().any(|event| rule.matches(event)))
        {
            result.insert(title, rule.target_group);
        }
    }

    result
}
