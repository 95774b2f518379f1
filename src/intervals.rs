use std::collections::HashMap;

use log::warn;
use serde::Serialize;

use crate::clock::MatchClock;
use crate::error::TimelineError;
use crate::model::{LineupTeam, PlayerInterval};
use crate::timestamp::{self, round2};

/// A lineup interval resolved into one of its three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalSpan {
    /// The player never entered the pitch.
    Absent,
    /// On the pitch until the observed end of `period`.
    Open { from: f64, period: u32 },
    Closed {
        from: f64,
        to: f64,
        from_period: u32,
        to_period: u32,
    },
}

impl IntervalSpan {
    pub fn resolve(interval: &PlayerInterval) -> Result<Self, TimelineError> {
        let Some(raw_from) = interval.from.as_deref() else {
            return Ok(IntervalSpan::Absent);
        };
        let from = timestamp::parse(raw_from)?;
        let period = interval.period();
        match interval.to.as_deref() {
            None => Ok(IntervalSpan::Open { from, period }),
            Some(raw_to) => Ok(IntervalSpan::Closed {
                from,
                to: timestamp::parse(raw_to)?,
                from_period: period,
                to_period: interval.to_period.unwrap_or(period).max(period),
            }),
        }
    }

    /// Seconds on the pitch, floored at zero.
    pub fn seconds(&self, clock: &MatchClock) -> Result<f64, TimelineError> {
        let raw = match *self {
            IntervalSpan::Absent => 0.0,
            IntervalSpan::Open { from, period } => {
                let end = clock
                    .observed_duration(period)
                    .ok_or(TimelineError::MissingPeriodData(period))?;
                end - from
            }
            IntervalSpan::Closed {
                from,
                to,
                from_period,
                to_period,
            } if to_period > from_period => {
                clock.absolute(to_period, to) - clock.absolute(from_period, from)
            }
            IntervalSpan::Closed { from, to, .. } => to - from,
        };
        Ok(raw.max(0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataWarning {
    pub player: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalTotal {
    pub seconds: f64,
    pub warnings: Vec<TimelineError>,
}

/// Sums every interval of one player. A bad interval contributes zero and is
/// reported in `warnings`; it never stops the remaining intervals.
pub fn total_on_pitch(intervals: &[PlayerInterval], clock: &MatchClock) -> IntervalTotal {
    let mut total = IntervalTotal::default();
    for interval in intervals {
        match IntervalSpan::resolve(interval).and_then(|span| span.seconds(clock)) {
            Ok(seconds) => total.seconds += seconds,
            Err(err) => total.warnings.push(err),
        }
    }
    total
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerTimeRecord {
    pub player_name: String,
    pub team_name: String,
    pub total_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub records: Vec<PlayerTimeRecord>,
    pub warnings: Vec<DataWarning>,
}

impl Aggregation {
    /// Records with seconds rounded to two decimals, for reporting.
    pub fn rounded(&self) -> Vec<PlayerTimeRecord> {
        self.records
            .iter()
            .map(|r| PlayerTimeRecord {
                total_seconds: round2(r.total_seconds),
                ..r.clone()
            })
            .collect()
    }

    pub fn seconds_for(&self, player_name: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.player_name == player_name)
            .map(|r| r.total_seconds)
    }
}

/// Time on pitch for every player named in the lineups, one record per
/// distinct name in order of first appearance.
pub fn aggregate_lineups(teams: &[LineupTeam], clock: &MatchClock) -> Aggregation {
    let mut out = Aggregation::default();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for team in teams {
        for player in &team.lineup {
            let total = total_on_pitch(&player.positions, clock);
            for err in total.warnings {
                warn!("{} ({}): {err}; interval counted as zero", player.player_name, team.team_name);
                out.warnings.push(DataWarning {
                    player: player.player_name.clone(),
                    message: err.to_string(),
                });
            }

            match slots.get(&player.player_name) {
                Some(&idx) => out.records[idx].total_seconds += total.seconds,
                None => {
                    slots.insert(player.player_name.clone(), out.records.len());
                    out.records.push(PlayerTimeRecord {
                        player_name: player.player_name.clone(),
                        team_name: team.team_name.clone(),
                        total_seconds: total.seconds,
                    });
                }
            }
        }
    }
    out
}
