//! Filter resolution -- computes the exact instance set a subscriber
//! exports.
//!
//! Two filter kinds with different semantics:
//!
//! - A **domain filter** subscribes to groups, optionally adds single
//!   titles, and blacklists titles; the blacklist beats everything else.
//!   Resolving one requires the domain's [`Classification`].
//! - A **personal filter** carries an explicit title whitelist and a
//!   frozen-snapshot switch that pins membership to instances known when
//!   the filter was created.
//!
//! Title membership here is exact equality ([`exact_match`]), never the
//! substring containment rules use.

use crate::classifier::Classification;
use crate::error::{Result, SiftError};
use crate::event::{Event, GroupId};
use crate::rule::exact_match;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter scoped to a single source calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalFilter {
    /// Exact titles the subscriber selected.
    pub subscribed_event_titles: BTreeSet<String>,
    /// When the filter was created; the frozen-snapshot boundary.
    pub created_at: DateTime<Utc>,
    /// When false, instances ingested after `created_at` are hidden.
    pub include_future_events: bool,
}

/// Filter scoped to a domain's grouped events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    /// Groups whose series are included wholesale.
    pub subscribed_group_ids: Vec<GroupId>,
    /// Supplementary whitelist of single titles.
    pub subscribed_event_titles: BTreeSet<String>,
    /// Blacklist; beats both the group union and the whitelist.
    pub unselected_event_titles: BTreeSet<String>,
}

/// A validated subscriber filter -- exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    Personal(PersonalFilter),
    Domain(DomainFilter),
}

/// Resolve a domain filter against the domain's events and classification.
///
/// ```text
/// group_titles    = union of titles in the subscribed groups
/// included_titles = (group_titles ∪ subscribed_event_titles) − unselected_event_titles
/// ```
///
/// The blacklist is absolute: a blacklisted title is excluded even when an
/// explicit whitelist entry names it. No groups and no whitelist means an
/// empty result, never include-everything. Instances are emitted in input
/// order.
pub fn resolve_domain(
    filter: &DomainFilter,
    events: &[Event],
    classification: &Classification,
) -> Vec<Event> {
    let mut included: BTreeSet<String> = classification.titles_in_any(&filter.subscribed_group_ids);
    included.extend(filter.subscribed_event_titles.iter().cloned());
    for title in &filter.unselected_event_titles {
        included.remove(title);
    }

    events
        .iter()
        .filter(|event| included.contains(&event.title))
        .cloned()
        .collect()
}

/// Resolve a personal filter against the source calendar's events.
///
/// Inclusion is the whitelist alone, compared with [`exact_match`] -- a
/// whitelist entry `"Meeting"` does not pull in `"Meeting Room"`. With
/// `include_future_events` false the result is additionally frozen to the
/// snapshot at filter creation: only instances whose `created_at` is at or
/// before the filter's survive. Instances with no `created_at` always
/// survive the freeze; ambiguous provenance means "always visible", not
/// excluded.
pub fn resolve_personal(filter: &PersonalFilter, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            filter
                .subscribed_event_titles
                .iter()
                .any(|title| exact_match(title, &event.title))
        })
        .filter(|event| {
            filter.include_future_events
                || event
                    .created_at
                    .is_none_or(|created| created <= filter.created_at)
        })
        .cloned()
        .collect()
}

/// Resolve a filter of either kind.
///
/// Domain filters contractually require a classification map; passing
/// `None` for one is a caller bug and yields
/// [`SiftError::MissingClassification`] rather than a silently empty
/// export. Personal filters ignore `classification`. Prefer the per-kind
/// entry points when the kind is statically known -- they make the
/// contract unrepresentable instead of checked.
pub fn resolve(
    filter: &Filter,
    events: &[Event],
    classification: Option<&Classification>,
) -> Result<Vec<Event>> {
    match filter {
        Filter::Personal(personal) => Ok(resolve_personal(personal, events)),
        Filter::Domain(domain) => {
            let classification = classification.ok_or(SiftError::MissingClassification)?;
            Ok(resolve_domain(domain, events, classification))
        }
    }
}
