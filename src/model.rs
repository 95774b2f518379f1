use serde::{Deserialize, Serialize};

pub const FIRST_HALF: u32 = 1;
pub const SECOND_HALF: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotDetail {
    #[serde(default)]
    pub outcome: Option<NamedRef>,
}

/// One discrete action from the event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "string_or_default")]
    pub id: String,
    #[serde(default)]
    pub index: u64,
    #[serde(default)]
    pub match_id: Option<u64>,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub second: Option<u32>,
    #[serde(rename = "type", default)]
    pub event_type: NamedRef,
    #[serde(default)]
    pub team: Option<NamedRef>,
    #[serde(default)]
    pub player: Option<NamedRef>,
    #[serde(default)]
    pub shot: Option<ShotDetail>,
}

fn string_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let rendered = match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(rendered)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Pass,
    Shot,
    FoulCommitted,
    OwnGoalFor,
    Other,
}

impl EventKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Pass" => EventKind::Pass,
            "Shot" => EventKind::Shot,
            "Foul Committed" => EventKind::FoulCommitted,
            "Own Goal For" => EventKind::OwnGoalFor,
            _ => EventKind::Other,
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        EventKind::from_type_name(&self.event_type.name)
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team
            .as_ref()
            .map(|t| t.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn is_goal_shot(&self) -> bool {
        self.kind() == EventKind::Shot
            && self
                .shot
                .as_ref()
                .and_then(|s| s.outcome.as_ref())
                .is_some_and(|o| o.name == "Goal")
    }
}

/// One on-pitch spell from the lineup log. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInterval {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from_period: Option<u32>,
    #[serde(default)]
    pub to_period: Option<u32>,
    #[serde(default)]
    pub start_reason: Option<String>,
    #[serde(default)]
    pub end_reason: Option<String>,
}

impl PlayerInterval {
    pub fn period(&self) -> u32 {
        self.from_period.unwrap_or(FIRST_HALF)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    #[serde(default)]
    pub player_id: Option<u64>,
    pub player_name: String,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub positions: Vec<PlayerInterval>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupTeam {
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub match_id: Option<u64>,
    #[serde(default)]
    pub lineup: Vec<LineupPlayer>,
}
