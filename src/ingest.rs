use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{Event, LineupTeam};

pub const REQUIRED_LINEUP_FIELDS: &[&str] = &[
    "match_date",
    "match_id",
    "events",
    "formations",
    "lineup",
    "team_id",
    "team_name",
];
pub const REQUIRED_EVENT_FIELDS: &[&str] = &["match_id", "id", "index", "period", "timestamp", "type"];

#[derive(Debug, Clone)]
pub struct LoadedMatch {
    pub events: Vec<Event>,
    pub lineups: Vec<LineupTeam>,
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// `(team index, missing fields)` for every lineup record with gaps.
    pub teams_missing: Vec<(usize, Vec<String>)>,
    pub event_fields_missing: BTreeSet<String>,
    pub lineup_match_ids: BTreeSet<u64>,
    pub event_match_ids: BTreeSet<u64>,
    pub match_ids_consistent: bool,
    /// Records dropped because they could not be decoded.
    pub rejected_records: Vec<RejectedRecord>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.teams_missing.is_empty()
            && self.event_fields_missing.is_empty()
            && self.match_ids_consistent
            && self.rejected_records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub log: &'static str,
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RejectedRecord>,
}

/// Reads a log file holding either one JSON object per line or a JSON array.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_records(&raw).with_context(|| format!("invalid json in {}", path.display()))
}

pub fn parse_records(raw: &str) -> Result<Vec<Value>> {
    let body = raw.trim_start_matches('\u{feff}').trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    if body.starts_with('[') {
        return serde_json::from_str(body).context("invalid json array");
    }
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line.trim()).with_context(|| format!("invalid json on line {}", idx + 1))
        })
        .collect()
}

pub fn missing_fields(record: &Value, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| record.get(**field).is_none())
        .map(|field| field.to_string())
        .collect()
}

pub fn validate(lineups: &[Value], events: &[Value]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (idx, team) in lineups.iter().enumerate() {
        let missing = missing_fields(team, REQUIRED_LINEUP_FIELDS);
        if !missing.is_empty() {
            report.teams_missing.push((idx, missing));
        }
    }
    for event in events {
        report
            .event_fields_missing
            .extend(missing_fields(event, REQUIRED_EVENT_FIELDS));
    }

    report.lineup_match_ids = lineups.iter().filter_map(match_id_of).collect();
    report.event_match_ids = events.iter().filter_map(match_id_of).collect();
    report.match_ids_consistent = !report.lineup_match_ids.is_empty()
        && report.lineup_match_ids == report.event_match_ids;
    report
}

fn match_id_of(record: &Value) -> Option<u64> {
    let v = record.get("match_id")?;
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn decode_events(records: Vec<Value>) -> Decoded<Event> {
    decode_each(records, "event")
}

pub fn decode_lineups(records: Vec<Value>) -> Decoded<LineupTeam> {
    decode_each(records, "lineup")
}

/// Decodes records one by one; a record with an unexpected shape is dropped
/// and reported instead of failing the whole log.
fn decode_each<T: DeserializeOwned>(records: Vec<Value>, log: &'static str) -> Decoded<T> {
    let mut out = Decoded {
        records: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value(record) {
            Ok(item) => out.records.push(item),
            Err(err) => {
                warn!("{log} record {index} has an unexpected shape: {err}; skipped");
                out.rejected.push(RejectedRecord {
                    log,
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }
    out
}

pub fn load_match(events_path: &Path, lineups_path: &Path) -> Result<LoadedMatch> {
    let lineup_records = load_records(lineups_path).context("error loading lineups file")?;
    let event_records = load_records(events_path).context("error loading events file")?;
    info!(
        "loaded {} lineup records and {} events",
        lineup_records.len(),
        event_records.len()
    );

    let mut validation = validate(&lineup_records, &event_records);
    for (idx, missing) in &validation.teams_missing {
        warn!("team {idx} missing fields: {}", missing.join(", "));
    }
    if !validation.event_fields_missing.is_empty() {
        warn!("events missing some required fields: {:?}", validation.event_fields_missing);
    }
    if !validation.match_ids_consistent {
        warn!(
            "match id mismatch: lineups {:?} vs events {:?}",
            validation.lineup_match_ids, validation.event_match_ids
        );
    }

    let events = decode_events(event_records);
    let lineups = decode_lineups(lineup_records);
    validation.rejected_records.extend(lineups.rejected);
    validation.rejected_records.extend(events.rejected);

    Ok(LoadedMatch {
        events: events.records,
        lineups: lineups.records,
        validation,
    })
}
