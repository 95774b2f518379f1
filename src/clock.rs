use std::collections::BTreeMap;

use log::{debug, warn};

use crate::error::TimelineError;
use crate::model::Event;
use crate::timestamp;

/// Absolute match timeline reconstructed from per-period clocks.
///
/// Each period's duration is the largest timestamp observed for it. A period's
/// start on the absolute timeline is the sum of every lower-numbered period's
/// observed duration, so unobserved periods simply contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchClock {
    period_ends: BTreeMap<u32, f64>,
    skipped_timestamps: usize,
    invalid_periods: usize,
}

impl MatchClock {
    pub fn build(events: &[Event]) -> Self {
        let mut period_ends: BTreeMap<u32, f64> = BTreeMap::new();
        let mut skipped_timestamps = 0usize;
        let mut invalid_periods = 0usize;

        for event in events {
            let (Some(period), Some(raw)) = (event.period, event.timestamp.as_deref()) else {
                continue;
            };
            if period == 0 {
                warn!("event {}: period 0 is not a match period; ignored for period end", event.id);
                invalid_periods += 1;
                continue;
            }
            let seconds = match timestamp::parse(raw) {
                Ok(seconds) => seconds,
                Err(err) => {
                    warn!("event {} (period {period}): {err}; ignored for period end", event.id);
                    skipped_timestamps += 1;
                    continue;
                }
            };
            let end = period_ends.entry(period).or_insert(seconds);
            if seconds > *end {
                *end = seconds;
            }
        }

        debug!(
            "match clock built: periods={:?} skipped_timestamps={skipped_timestamps} invalid_periods={invalid_periods}",
            period_ends
        );
        Self {
            period_ends,
            skipped_timestamps,
            invalid_periods,
        }
    }

    /// Observed duration of `period`, or 0 when no event reached it.
    pub fn period_duration(&self, period: u32) -> f64 {
        self.observed_duration(period).unwrap_or(0.0)
    }

    pub fn observed_duration(&self, period: u32) -> Option<f64> {
        self.period_ends.get(&period).copied()
    }

    pub fn period_start(&self, period: u32) -> f64 {
        self.period_ends.range(..period).map(|(_, end)| *end).sum()
    }

    pub fn absolute(&self, period: u32, local_seconds: f64) -> f64 {
        self.period_start(period) + local_seconds
    }

    pub fn total_duration(&self) -> f64 {
        self.period_ends.values().sum()
    }

    pub fn total_duration_ms(&self) -> u64 {
        (self.total_duration() * 1000.0).round() as u64
    }

    /// Observed periods in ascending order with their durations.
    pub fn periods(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.period_ends.iter().map(|(p, d)| (*p, *d))
    }

    pub fn skipped_timestamps(&self) -> usize {
        self.skipped_timestamps
    }

    /// Events dropped from the clock because their period was 0.
    pub fn invalid_periods(&self) -> usize {
        self.invalid_periods
    }

    /// Fails on the first period numbered below `period` that was never observed.
    pub fn require_periods_before(&self, period: u32) -> Result<(), TimelineError> {
        match (1..period).find(|p| !self.period_ends.contains_key(p)) {
            Some(missing) => Err(TimelineError::MissingPeriodData(missing)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(period: u32, ts: &str) -> Event {
        Event {
            period: Some(period),
            timestamp: Some(ts.to_string()),
            ..Event::default()
        }
    }

    #[test]
    fn takes_maximum_not_latest_timestamp() {
        let clock = MatchClock::build(&[
            ev(1, "00:10:00.000"),
            ev(1, "00:47:12.500"),
            ev(1, "00:46:00.000"),
        ]);
        assert_eq!(clock.period_duration(1), 2832.5);
    }

    #[test]
    fn unobserved_period_has_zero_duration_and_inherits_offset() {
        let clock = MatchClock::build(&[ev(1, "00:45:00.000"), ev(3, "00:10:00.000")]);
        assert_eq!(clock.period_duration(2), 0.0);
        assert_eq!(clock.observed_duration(2), None);
        assert_eq!(clock.absolute(2, 30.0), 2730.0);
        assert_eq!(clock.period_start(3), 2700.0);
        assert_eq!(
            clock.require_periods_before(3),
            Err(TimelineError::MissingPeriodData(2))
        );
    }

    #[test]
    fn malformed_and_missing_timestamps_are_skipped() {
        let mut no_period = ev(1, "00:50:00.000");
        no_period.period = None;
        let clock = MatchClock::build(&[ev(1, "00:20:00.000"), ev(1, "garbage"), no_period]);
        assert_eq!(clock.period_duration(1), 1200.0);
        assert_eq!(clock.skipped_timestamps(), 1);
    }

    #[test]
    fn period_zero_does_not_shift_offsets() {
        let clock = MatchClock::build(&[
            ev(0, "00:10:00.000"),
            ev(1, "00:45:00.000"),
            ev(2, "00:20:00.000"),
        ]);
        assert_eq!(clock.period_start(1), 0.0);
        assert_eq!(clock.period_start(2), 2700.0);
        assert_eq!(clock.observed_duration(0), None);
        assert_eq!(clock.invalid_periods(), 1);
        assert_eq!(clock.total_duration(), 3900.0);
    }

    #[test]
    fn empty_log_has_no_duration() {
        let clock = MatchClock::build(&[]);
        assert_eq!(clock.total_duration(), 0.0);
        assert_eq!(clock.periods().count(), 0);
        assert!(clock.require_periods_before(1).is_ok());
    }
}
