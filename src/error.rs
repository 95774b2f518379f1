use thiserror::Error;

/// Recoverable conditions raised while reconstructing the match timeline.
///
/// None of these abort processing of a whole log: callers decide whether a
/// record contributes zero or whether a derived value is "not available".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("malformed timestamp '{0}' (expected HH:MM:SS.mmm)")]
    MalformedTimestamp(String),
    #[error("timestamp is missing")]
    MissingTimestamp,
    #[error("event has no usable period (periods start at 1)")]
    MissingPeriod,
    #[error("period {0} was never observed in the event log")]
    MissingPeriodData(u32),
    #[error("no {0} found")]
    NoSuchEvent(&'static str),
}
