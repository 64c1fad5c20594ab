//! `calsift` CLI — classify feed events into groups and resolve subscriber
//! filters from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Grouped schedule from events + rules (events via stdin)
//! cat events.json | calsift classify -r rules.json
//!
//! # Same, with a group roster for display names and manual pins
//! calsift classify -e events.json -r rules.json -g groups.json -m manual.json
//!
//! # Resolve a domain filter (rules required for classification)
//! calsift resolve -e events.json -f filter.json -r rules.json
//!
//! # Resolve a personal filter, writing the export set to a file
//! calsift resolve -e events.json -f filter.json -o export.json
//! ```
//!
//! Inputs are JSON: an array of event instances, an array of rule records,
//! an array of manual assignments, and a single filter record. Output is
//! pretty-printed JSON on stdout (or `-o`), ready for the iCal export step.

use anyhow::{bail, Context, Result};
use calsift_core::{
    build_grouped_schedule, classify, resolve, rules_from_records, AssignmentRule, Event, Filter,
    FilterRecord, Group, ManualAssignment, RuleRecord,
};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "calsift",
    version,
    about = "Classify and resolve republished calendar feeds"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify events into groups and print the grouped schedule
    Classify {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Rule records JSON file
        #[arg(short, long)]
        rules: String,
        /// Manual assignments JSON file
        #[arg(short, long)]
        manual: Option<String>,
        /// Group roster JSON file; without it, groups get placeholder names
        #[arg(short, long)]
        groups: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Resolve a subscriber filter into the exact export set
    Resolve {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Filter record JSON file
        #[arg(short, long)]
        filter: String,
        /// Rule records JSON file; required for domain filters
        #[arg(short, long)]
        rules: Option<String>,
        /// Manual assignments JSON file
        #[arg(short, long)]
        manual: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            events,
            rules,
            manual,
            groups,
            output,
        } => {
            let events = read_events(events.as_deref())?;
            let rules = load_rules(&rules)?;
            let manual = load_manual(manual.as_deref())?;

            let classification = classify(&events, &rules, &manual);

            // Without a roster, synthesize one entry per populated group so
            // the schedule stays usable with rule files alone.
            let roster: Vec<Group> = match groups {
                Some(path) => load_json(&path, "groups")?,
                None => classification
                    .iter()
                    .map(|(id, _)| Group {
                        id,
                        name: format!("group-{id}"),
                    })
                    .collect(),
            };

            let schedule = build_grouped_schedule(&events, &classification, &roster);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&schedule)?)?;
        }
        Commands::Resolve {
            events,
            filter,
            rules,
            manual,
            output,
        } => {
            let events = read_events(events.as_deref())?;
            let record: FilterRecord = load_json(&filter, "filter")?;
            let filter = Filter::try_from(record).context("Invalid filter record")?;

            // Domain filters are owed a classification map; this binary is
            // the caller that must satisfy that contract.
            let classification = match &filter {
                Filter::Domain(_) => {
                    let Some(path) = rules.as_deref() else {
                        bail!("a domain filter needs --rules to build the classification");
                    };
                    let rules = load_rules(path)?;
                    let manual = load_manual(manual.as_deref())?;
                    Some(classify(&events, &rules, &manual))
                }
                Filter::Personal(_) => None,
            };

            let resolved = resolve(&filter, &events, classification.as_ref())
                .context("Failed to resolve filter")?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&resolved)?)?;
        }
    }

    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {what} file: {path}"))
}

fn load_rules(path: &str) -> Result<Vec<AssignmentRule>> {
    let records: Vec<RuleRecord> = load_json(path, "rules")?;
    rules_from_records(records).with_context(|| format!("Invalid rule in file: {path}"))
}

fn load_manual(path: Option<&str>) -> Result<Vec<ManualAssignment>> {
    match path {
        Some(path) => load_json(path, "manual assignments"),
        None => Ok(Vec::new()),
    }
}

fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file: {path}"))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read events from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Failed to parse events JSON")
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
