pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod intervals;
pub mod locator;
pub mod model;
pub mod report;
pub mod tally;
pub mod timestamp;
