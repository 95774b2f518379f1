use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Event, EventKind};

pub use crate::locator::{GoalRecord, GoalType, goals};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassCount {
    pub player: String,
    pub passes: u32,
}

/// Passes per player, most prolific first; ties break on name.
pub fn pass_counts(events: &[Event]) -> Vec<PassCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for event in events.iter().filter(|e| e.kind() == EventKind::Pass) {
        let Some(player) = event.player_name() else {
            continue;
        };
        *counts.entry(player).or_insert(0) += 1;
    }

    let mut rows: Vec<PassCount> = counts
        .into_iter()
        .map(|(player, passes)| PassCount {
            player: player.to_string(),
            passes,
        })
        .collect();
    rows.sort_by(|a, b| b.passes.cmp(&a.passes).then_with(|| a.player.cmp(&b.player)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NamedRef;

    fn pass(player: Option<&str>) -> Event {
        Event {
            event_type: NamedRef::named("Pass"),
            player: player.map(NamedRef::named),
            ..Event::default()
        }
    }

    #[test]
    fn counts_sorted_by_volume_then_name() {
        let events = vec![
            pass(Some("Bentancur")),
            pass(Some("Maddison")),
            pass(Some("Bentancur")),
            pass(Some("Kulusevski")),
            pass(None),
            Event {
                event_type: NamedRef::named("Carry"),
                player: Some(NamedRef::named("Maddison")),
                ..Event::default()
            },
        ];
        let rows = pass_counts(&events);
        assert_eq!(
            rows,
            vec![
                PassCount {
                    player: "Bentancur".to_string(),
                    passes: 2
                },
                PassCount {
                    player: "Kulusevski".to_string(),
                    passes: 1
                },
                PassCount {
                    player: "Maddison".to_string(),
                    passes: 1
                },
            ]
        );
    }
}
