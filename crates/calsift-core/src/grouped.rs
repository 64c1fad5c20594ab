//! Grouped schedule view -- recurring series aggregated per group.
//!
//! This is the operator-facing response shape: one entry per group that
//! claimed at least one series, plus an `ungrouped` list for everything
//! classification left unassigned.

use crate::classifier::Classification;
use crate::event::{distinct_titles, Event, Group, GroupId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One recurring series with its instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub title: String,
    pub instance_count: usize,
    /// Instances sorted ascending by start time; ties broken by uid so the
    /// output is stable.
    pub instances: Vec<Event>,
}

/// A group with the series assigned to it, sorted by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSchedule {
    pub id: GroupId,
    pub name: String,
    pub series: Vec<SeriesSummary>,
}

/// The full grouped/ungrouped view over a domain's events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedSchedule {
    pub groups: Vec<GroupSchedule>,
    /// Series no group claimed, sorted by title.
    pub ungrouped: Vec<SeriesSummary>,
}

fn summarize(title: &str, events: &[Event]) -> SeriesSummary {
    let mut instances: Vec<Event> = events
        .iter()
        .filter(|event| event.title == title)
        .cloned()
        .collect();
    instances.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.uid.cmp(&b.uid)));
    SeriesSummary {
        title: title.to_string(),
        instance_count: instances.len(),
        instances,
    }
}

/// Build the grouped view of `events` under `classification`.
///
/// Groups are emitted in the order of the `groups` roster (the operator's
/// display order); a group that claimed no series is omitted entirely.
/// Titles classified to a group missing from the roster are rendered as
/// ungrouped rather than dropped -- referential integrity is the store's
/// concern, the view stays total. Empty inputs yield an empty view.
pub fn build_grouped_schedule(
    events: &[Event],
    classification: &Classification,
    groups: &[Group],
) -> GroupedSchedule {
    let roster: BTreeSet<GroupId> = groups.iter().map(|group| group.id).collect();

    let mut out = GroupedSchedule::default();
    for group in groups {
        let Some(titles) = classification.titles_in(group.id) else {
            continue;
        };
        if titles.is_empty() {
            continue;
        }
        out.groups.push(GroupSchedule {
            id: group.id,
            name: group.name.clone(),
            series: titles.iter().map(|title| summarize(title, events)).collect(),
        });
    }

    for title in distinct_titles(events) {
        let grouped = classification
            .group_of(&title)
            .is_some_and(|group| roster.contains(&group));
        if !grouped {
            out.ungrouped.push(summarize(&title, events));
        }
    }

    out
}
