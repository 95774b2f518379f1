use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

const EVENTS_ENV: &str = "EVENTS_PATH";
const LINEUPS_ENV: &str = "LINEUPS_PATH";

#[derive(Debug, Clone, Parser)]
#[command(name = "match_timeline", about = "Per-match timeline statistics from event and lineup logs")]
pub struct Args {
    /// Event log (JSON lines or JSON array). Falls back to $EVENTS_PATH.
    #[arg(long)]
    pub events: Option<PathBuf>,
    /// Lineup log (JSON lines or JSON array). Falls back to $LINEUPS_PATH.
    #[arg(long)]
    pub lineups: Option<PathBuf>,
    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
    /// Abort when validation finds missing fields or mismatched match ids.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub events_path: PathBuf,
    pub lineups_path: PathBuf,
    pub json: bool,
    pub strict: bool,
}

impl Config {
    /// Flags win over the environment; `.env` files are read by the caller.
    pub fn resolve(args: Args) -> Result<Self> {
        let events_path = args
            .events
            .or_else(|| opt_env(EVENTS_ENV).map(PathBuf::from))
            .ok_or_else(|| anyhow!("no events file: pass --events or set {EVENTS_ENV}"))?;
        let lineups_path = args
            .lineups
            .or_else(|| opt_env(LINEUPS_ENV).map(PathBuf::from))
            .ok_or_else(|| anyhow!("no lineups file: pass --lineups or set {LINEUPS_ENV}"))?;
        Ok(Self {
            events_path,
            lineups_path,
            json: args.json,
            strict: args.strict,
        })
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_used_when_present() {
        let args = Args::parse_from([
            "match_timeline",
            "--events",
            "data/events.json",
            "--lineups",
            "data/lineups.json",
            "--json",
        ]);
        let cfg = Config::resolve(args).unwrap();
        assert_eq!(cfg.events_path, PathBuf::from("data/events.json"));
        assert_eq!(cfg.lineups_path, PathBuf::from("data/lineups.json"));
        assert!(cfg.json);
        assert!(!cfg.strict);
    }
}
