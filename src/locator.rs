use serde::Serialize;

use crate::clock::MatchClock;
use crate::error::TimelineError;
use crate::model::{Event, EventKind, SECOND_HALF};
use crate::timestamp;

/// Absolute seconds since kick-off for a period-local timestamp.
pub fn locate(period: u32, local_timestamp: &str, clock: &MatchClock) -> Result<f64, TimelineError> {
    let local = timestamp::parse(local_timestamp)?;
    Ok(clock.absolute(period, local))
}

pub fn locate_event(event: &Event, clock: &MatchClock) -> Result<f64, TimelineError> {
    let period = event
        .period
        .filter(|p| *p > 0)
        .ok_or(TimelineError::MissingPeriod)?;
    let raw = event
        .timestamp
        .as_deref()
        .ok_or(TimelineError::MissingTimestamp)?;
    locate(period, raw, clock)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoulTiming {
    pub seconds: f64,
    pub local_timestamp: String,
    pub player: Option<String>,
    pub team: Option<String>,
}

/// First committed foul of the second half, by stream order, located on the
/// absolute timeline. Needs the first half's observed end to be known.
pub fn first_second_half_foul(
    events: &[Event],
    clock: &MatchClock,
) -> Result<FoulTiming, TimelineError> {
    let foul = events
        .iter()
        .find(|e| e.period == Some(SECOND_HALF) && e.kind() == EventKind::FoulCommitted)
        .ok_or(TimelineError::NoSuchEvent("foul committed in the second half"))?;

    clock.require_periods_before(SECOND_HALF)?;
    let seconds = locate_event(foul, clock)?;

    Ok(FoulTiming {
        seconds,
        local_timestamp: foul.timestamp.clone().unwrap_or_default(),
        player: foul.player_name().map(str::to_string),
        team: foul.team_name().map(str::to_string),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalType {
    #[serde(rename = "Goal")]
    Goal,
    #[serde(rename = "Own Goal")]
    OwnGoal,
}

impl GoalType {
    pub fn label(self) -> &'static str {
        match self {
            GoalType::Goal => "Goal",
            GoalType::OwnGoal => "Own Goal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRecord {
    pub player: Option<String>,
    pub team: Option<String>,
    /// Minute as declared by the event log.
    pub minute: Option<u32>,
    pub goal_type: GoalType,
    pub elapsed_seconds: Option<f64>,
}

/// Converted shots and own-goals-for, in stream order.
pub fn goals(events: &[Event], clock: &MatchClock) -> Vec<GoalRecord> {
    events
        .iter()
        .filter_map(|event| {
            let goal_type = match event.kind() {
                EventKind::Shot if event.is_goal_shot() => GoalType::Goal,
                EventKind::OwnGoalFor => GoalType::OwnGoal,
                _ => return None,
            };
            Some(GoalRecord {
                player: event.player_name().map(str::to_string),
                team: event.team_name().map(str::to_string),
                minute: event.minute,
                goal_type,
                elapsed_seconds: locate_event(event, clock).ok(),
            })
        })
        .collect()
}
