use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use match_timeline::config::{Args, Config};
use match_timeline::ingest;
use match_timeline::report::MatchReport;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let cfg = Config::resolve(Args::parse())?;
    let loaded = ingest::load_match(&cfg.events_path, &cfg.lineups_path)?;

    if cfg.strict && !loaded.validation.is_clean() {
        bail!("validation failed: {:?}", loaded.validation);
    }
    info!(
        "validation complete (clean={})",
        loaded.validation.is_clean()
    );

    let report = MatchReport::build(&loaded.events, &loaded.lineups);
    if cfg.json {
        let body = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{body}");
    } else {
        println!("Total events: {}", loaded.events.len());
        print!("{}", report.render_text());
    }
    Ok(())
}
