//! # calsift-core
//!
//! Event classification and filter resolution for republished calendar
//! feeds.
//!
//! Feed aggregators ingest third-party calendars and let operators
//! re-publish filtered subsets to subscribers. This crate is the engine in
//! the middle: it assigns recurring series to organizational groups via
//! simple or boolean-compound matching rules (explicit priority order,
//! first match wins, manual pins beat everything), aggregates instances
//! into a grouped/ungrouped view, and resolves a subscriber's filter --
//! personal or domain-scoped -- into the exact instance set to export.
//!
//! Everything here is a pure function over immutable borrows: no I/O, no
//! shared state, safe to call concurrently. Fetching, persistence, and the
//! iCal wire format live in the surrounding collaborators.
//!
//! ## Quick start
//!
//! ```rust
//! use calsift_core::{
//!     classify, resolve_domain, AssignmentRule, Condition, ConditionKind, DomainFilter, Event,
//!     GroupId,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! let event = Event {
//!     uid: "ev-1".into(),
//!     title: "Fußball U16 Jungen".into(),
//!     description: None,
//!     categories: vec![],
//!     start: Utc.with_ymd_and_hms(2026, 3, 7, 10, 0, 0).unwrap(),
//!     end: Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap(),
//!     created_at: None,
//! };
//! let rule = AssignmentRule::simple(
//!     1,
//!     GroupId(1),
//!     10,
//!     Condition::new(ConditionKind::TitleContains, "fußball").unwrap(),
//! );
//!
//! let classification = classify(std::slice::from_ref(&event), &[rule], &[]);
//! assert_eq!(classification.group_of("Fußball U16 Jungen"), Some(GroupId(1)));
//!
//! let filter = DomainFilter {
//!     subscribed_group_ids: vec![GroupId(1)],
//!     subscribed_event_titles: Default::default(),
//!     unselected_event_titles: Default::default(),
//! };
//! let exported = resolve_domain(&filter, std::slice::from_ref(&event), &classification);
//! assert_eq!(exported.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`event`] — event instances, groups, title helpers
//! - [`rule`] — match conditions and assignment rules
//! - [`classifier`] — title → group resolution
//! - [`grouped`] — grouped/ungrouped schedule view
//! - [`resolver`] — personal and domain filter resolution
//! - [`record`] — flat wire rows validated into engine types
//! - [`error`] — error types

pub mod classifier;
pub mod error;
pub mod event;
pub mod grouped;
pub mod record;
pub mod resolver;
pub mod rule;

pub use classifier::{classify, Classification, ManualAssignment};
pub use error::SiftError;
pub use event::{distinct_titles, Event, Group, GroupId};
pub use grouped::{build_grouped_schedule, GroupSchedule, GroupedSchedule, SeriesSummary};
pub use record::{rules_from_records, ConditionRecord, FilterRecord, RuleRecord};
pub use resolver::{
    resolve, resolve_domain, resolve_personal, DomainFilter, Filter, PersonalFilter,
};
pub use rule::{
    exact_match, substring_match, AssignmentRule, CombineOp, Condition, ConditionKind, Matcher,
};
