use std::fmt::Write as _;

use serde::Serialize;

use crate::clock::MatchClock;
use crate::error::TimelineError;
use crate::intervals::{DataWarning, PlayerTimeRecord, aggregate_lineups};
use crate::locator::{FoulTiming, GoalRecord, GoalType, first_second_half_foul, goals};
use crate::model::{Event, LineupTeam};
use crate::tally::{PassCount, pass_counts};
use crate::timestamp::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FoulResult {
    Found(FoulTiming),
    NotFound,
    Undetermined { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: u32,
    pub duration_seconds: f64,
    pub starts_at_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub player_times: Vec<PlayerTimeRecord>,
    pub duration_seconds: f64,
    pub duration_minutes: f64,
    pub duration_ms: u64,
    pub periods: Vec<PeriodSummary>,
    pub pass_counts: Vec<PassCount>,
    pub goals: Vec<GoalRecord>,
    pub first_second_half_foul: FoulResult,
    pub warnings: Vec<DataWarning>,
    /// Events whose timestamp could not be used for their period's end.
    pub skipped_timestamps: usize,
    /// Events dropped from the timeline because their period was 0.
    pub invalid_periods: usize,
}

impl MatchReport {
    pub fn build(events: &[Event], lineups: &[LineupTeam]) -> Self {
        let clock = MatchClock::build(events);
        let aggregation = aggregate_lineups(lineups, &clock);

        let first_second_half_foul = match first_second_half_foul(events, &clock) {
            Ok(timing) => FoulResult::Found(FoulTiming {
                seconds: round2(timing.seconds),
                ..timing
            }),
            Err(TimelineError::NoSuchEvent(_)) => FoulResult::NotFound,
            Err(err) => FoulResult::Undetermined {
                reason: err.to_string(),
            },
        };

        let total = clock.total_duration();
        Self {
            player_times: aggregation.rounded(),
            duration_seconds: round2(total),
            duration_minutes: round2(total / 60.0),
            duration_ms: clock.total_duration_ms(),
            periods: clock
                .periods()
                .map(|(period, duration)| PeriodSummary {
                    period,
                    duration_seconds: round2(duration),
                    starts_at_seconds: round2(clock.period_start(period)),
                })
                .collect(),
            pass_counts: pass_counts(events),
            goals: goals(events, &clock),
            first_second_half_foul,
            warnings: aggregation.warnings,
            skipped_timestamps: clock.skipped_timestamps(),
            invalid_periods: clock.invalid_periods(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "(a) Player Time on Pitch");
        for row in &self.player_times {
            let _ = writeln!(
                out,
                "  {:<32} {:<24} {:>9.2}s",
                row.player_name, row.team_name, row.total_seconds
            );
        }

        let _ = writeln!(out, "\n(b) Match Duration");
        let _ = writeln!(
            out,
            "  {} minutes ({} milliseconds)",
            self.duration_minutes, self.duration_ms
        );

        let _ = writeln!(out, "\n(c) Pass Count by Player");
        for row in &self.pass_counts {
            let _ = writeln!(out, "  {:<32} {:>4}", row.player, row.passes);
        }

        let _ = writeln!(out, "\n(d) Goal Times");
        if self.goals.is_empty() {
            let _ = writeln!(out, "  No goals found in match data.");
        }
        for goal in &self.goals {
            let player = goal.player.as_deref().unwrap_or("Unknown player");
            let team = goal.team.as_deref().unwrap_or("unknown team");
            let minute = goal
                .minute
                .map(|m| m.to_string())
                .unwrap_or_else(|| "?".to_string());
            match goal.goal_type {
                GoalType::OwnGoal => {
                    let _ = writeln!(out, "  {player} scored an OWN GOAL for {team} at minute {minute}");
                }
                GoalType::Goal => {
                    let _ = writeln!(out, "  {player} scored for {team} at minute {minute}");
                }
            }
        }

        let _ = writeln!(out, "\n(e) First Foul in Second Half");
        match &self.first_second_half_foul {
            FoulResult::Found(foul) => {
                let _ = writeln!(
                    out,
                    "  First foul in 2nd half occurred at {} seconds from match start.",
                    foul.seconds
                );
            }
            FoulResult::NotFound => {
                let _ = writeln!(out, "  No fouls found in second half.");
            }
            FoulResult::Undetermined { reason } => {
                let _ = writeln!(out, "  Could not determine foul time accurately ({reason}).");
            }
        }

        if self.skipped_timestamps > 0 || self.invalid_periods > 0 {
            let _ = writeln!(
                out,
                "\nTimeline gaps: {} events with malformed timestamps, {} events with period 0 (period ends may be understated)",
                self.skipped_timestamps, self.invalid_periods
            );
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\nData warnings: {}", self.warnings.len());
            for w in self.warnings.iter().take(10) {
                let _ = writeln!(out, "  - {}: {}", w.player, w.message);
            }
        }
        out
    }
}
