use std::fs;
use std::path::PathBuf;

use match_timeline::ingest::{decode_events, decode_lineups, parse_records};
use match_timeline::locator::GoalType;
use match_timeline::model::{Event, LineupTeam};
use match_timeline::report::{FoulResult, MatchReport};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_match() -> (Vec<Event>, Vec<LineupTeam>) {
    let events = decode_events(parse_records(&read_fixture("events_4028837.json")).unwrap()).records;
    let lineups = decode_lineups(parse_records(&read_fixture("lineups_4028837.json")).unwrap()).records;
    (events, lineups)
}

fn seconds_for(report: &MatchReport, name: &str) -> f64 {
    report
        .player_times
        .iter()
        .find(|r| r.player_name == name)
        .map(|r| r.total_seconds)
        .unwrap_or_else(|| panic!("{name} missing from report"))
}

#[test]
fn duration_and_periods() {
    let (events, lineups) = fixture_match();
    let report = MatchReport::build(&events, &lineups);
    assert_eq!(report.duration_seconds, 5535.6);
    assert_eq!(report.duration_ms, 5_535_600);
    assert_eq!(report.duration_minutes, 92.26);
    assert_eq!(report.periods.len(), 2);
    assert_eq!(report.periods[1].starts_at_seconds, 2832.5);
}

#[test]
fn player_times_follow_lineup_order() {
    let (events, lineups) = fixture_match();
    let report = MatchReport::build(&events, &lineups);
    let names: Vec<&str> = report.player_times.iter().map(|r| r.player_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Bethany England",
            "Martha Thomas",
            "Jessica Naz",
            "Eleanor Heeps",
            "Khadija Shaw",
            "Laia Aleixandri",
        ]
    );
    assert_eq!(seconds_for(&report, "Bethany England"), 5535.6);
    assert_eq!(seconds_for(&report, "Martha Thomas"), 1800.0);
    assert_eq!(seconds_for(&report, "Jessica Naz"), 3432.5);
    assert_eq!(seconds_for(&report, "Eleanor Heeps"), 0.0);
    assert_eq!(seconds_for(&report, "Laia Aleixandri"), 0.0);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].player, "Laia Aleixandri");
}

#[test]
fn passes_goals_and_foul() {
    let (events, lineups) = fixture_match();
    let report = MatchReport::build(&events, &lineups);

    assert_eq!(report.pass_counts[0].player, "Bethany England");
    assert_eq!(report.pass_counts[0].passes, 2);
    assert_eq!(report.pass_counts[1].player, "Khadija Shaw");
    assert_eq!(report.pass_counts[2].player, "Martha Thomas");

    assert_eq!(report.goals.len(), 2);
    assert_eq!(report.goals[0].goal_type, GoalType::Goal);
    assert_eq!(report.goals[0].minute, Some(20));
    assert_eq!(report.goals[1].goal_type, GoalType::OwnGoal);
    assert_eq!(report.goals[1].minute, Some(34));

    match &report.first_second_half_foul {
        FoulResult::Found(foul) => {
            assert_eq!(foul.seconds, 3162.5);
            assert_eq!(foul.player.as_deref(), Some("Jessica Naz"));
        }
        other => panic!("expected a foul, got {other:?}"),
    }
}

#[test]
fn foul_without_first_half_is_undetermined() {
    let (events, lineups) = fixture_match();
    let second_half: Vec<Event> = events.into_iter().filter(|e| e.period == Some(2)).collect();
    let report = MatchReport::build(&second_half, &lineups);
    assert!(matches!(
        report.first_second_half_foul,
        FoulResult::Undetermined { .. }
    ));
}

#[test]
fn text_and_json_output() {
    let (events, lineups) = fixture_match();
    let report = MatchReport::build(&events, &lineups);

    let text = report.render_text();
    assert!(text.contains("Laia Aleixandri scored an OWN GOAL for Tottenham Hotspur Women at minute 34"));
    assert!(text.contains("First foul in 2nd half occurred at 3162.5 seconds"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["first_second_half_foul"]["status"], "found");
    assert_eq!(json["goals"][1]["goal_type"], "Own Goal");
    assert_eq!(json["duration_ms"], 5_535_600);
    assert_eq!(json["skipped_timestamps"], 0);
    assert!(!text.contains("Timeline gaps"));
}

#[test]
fn malformed_event_timestamps_are_surfaced() {
    let (mut events, lineups) = fixture_match();
    // the second-half closing event loses its clock reading
    events[15].timestamp = Some("45:03.1".to_string());
    let mut stray = events[3].clone();
    stray.period = Some(0);
    events.push(stray);

    let report = MatchReport::build(&events, &lineups);
    assert_eq!(report.skipped_timestamps, 1);
    assert_eq!(report.invalid_periods, 1);
    assert_eq!(report.periods[1].duration_seconds, 1800.0);
    assert_eq!(report.periods[1].starts_at_seconds, 2832.5);

    let text = report.render_text();
    assert!(text.contains("Timeline gaps: 1 events with malformed timestamps, 1 events with period 0"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["skipped_timestamps"], 1);
    assert_eq!(json["invalid_periods"], 1);
}
