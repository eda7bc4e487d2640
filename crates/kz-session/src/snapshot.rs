//! Snapshot export and import.
//!
//! A snapshot bundles every loaded deck with the draw history so a session
//! can be moved or restored. Importing merges decks into the registry.
//!
//! History written by other tools may not match [`HistoryEntry`]. Such
//! entries are skipped; the decks import regardless.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{SessionError, SessionResult};
use crate::history::HistoryEntry;

/// Exported session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Deck documents by name.
    pub decks: Map<String, Value>,
    /// Draw history, newest first. `None` leaves history alone on import.
    #[serde(
        default,
        deserialize_with = "readable_history",
        skip_serializing_if = "Option::is_none"
    )]
    pub history: Option<Vec<HistoryEntry>>,
    /// Total draws made. `None` leaves the counter alone on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_count: Option<u64>,
    /// When the snapshot was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Parse a snapshot, requiring a `decks` object.
    pub fn from_json(text: &str) -> SessionResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|source| SessionError::Json {
            context: "snapshot".to_string(),
            source,
        })?;
        if !value.get("decks").is_some_and(Value::is_object) {
            return Err(SessionError::Import(
                "missing \"decks\" object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|source| SessionError::Json {
            context: "snapshot".to_string(),
            source,
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| SessionError::Json {
            context: "snapshot".to_string(),
            source,
        })
    }

    /// The default file name for an export taken at `export_date`.
    pub fn file_name(&self) -> String {
        let date = self.export_date.unwrap_or_else(Utc::now);
        format!("trpg-cards-export-{}.json", date.format("%Y-%m-%d"))
    }
}

/// Keep the history entries that parse. A history with nothing readable in
/// it counts as absent, so importing it does not wipe the current one.
fn readable_history<'de, D>(deserializer: D) -> Result<Option<Vec<HistoryEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(history = %other, "ignoring history that is not a list");
            return Ok(None);
        }
    };

    let total = items.len();
    let entries: Vec<HistoryEntry> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable history entry");
                None
            }
        })
        .collect();

    if entries.is_empty() && total > 0 {
        return Ok(None);
    }
    Ok(Some(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parse_minimal_snapshot() {
        let snap = Snapshot::from_json(r#"{"decks": {"a": {"a": ["x"]}}}"#).unwrap();
        assert_eq!(snap.decks.len(), 1);
        assert!(snap.history.is_none());
        assert!(snap.draw_count.is_none());
    }

    #[test]
    fn missing_decks_is_rejected() {
        let err = Snapshot::from_json(r#"{"history": []}"#).unwrap_err();
        assert!(matches!(err, SessionError::Import(_)));
        let err = Snapshot::from_json(r#"{"decks": ["a"]}"#).unwrap_err();
        assert!(matches!(err, SessionError::Import(_)));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            Snapshot::from_json("{"),
            Err(SessionError::Json { .. })
        ));
    }

    #[test]
    fn round_trip_keeps_fields() {
        let mut decks = Map::new();
        decks.insert("d".to_string(), json!({"d": ["1"]}));
        let snap = Snapshot {
            decks,
            history: Some(Vec::new()),
            draw_count: Some(7),
            export_date: Some(Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()),
        };
        let text = snap.to_json().unwrap();
        assert!(text.contains("\"drawCount\": 7"));
        assert!(text.contains("\"exportDate\""));
        assert_eq!(Snapshot::from_json(&text).unwrap(), snap);
    }

    #[test]
    fn web_app_export_imports_decks() {
        let text = r#"{
            "decks": {"combat": {"name": "Combat", "cards": ["Ambush"]}},
            "history": [
                {"deck": "combat", "cards": ["Ambush"], "timestamp": "2025-01-01T00:00:00.000Z", "count": 1}
            ],
            "settings": {"soundEnabled": true, "animationSpeed": "normal"},
            "deckState": {},
            "exportDate": "2025-01-01T00:00:00.000Z"
        }"#;
        let snap = Snapshot::from_json(text).unwrap();
        assert_eq!(snap.decks["combat"]["cards"], json!(["Ambush"]));
        assert!(snap.history.is_none());
        assert!(snap.draw_count.is_none());
        assert_eq!(
            snap.export_date,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unreadable_history_entries_are_skipped() {
        let text = r#"{
            "decks": {},
            "history": [
                {"deck": "combat", "cards": ["Ambush"]},
                {"command": ".draw a", "deck": "a", "result": "1", "rawEntry": "1", "timestamp": "2026-10-19T08:30:00Z"}
            ]
        }"#;
        let history = Snapshot::from_json(text).unwrap().history.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].deck, "a");
    }

    #[test]
    fn non_list_history_is_ignored() {
        let snap = Snapshot::from_json(r#"{"decks": {}, "history": {"a": 1}}"#).unwrap();
        assert!(snap.history.is_none());
        let snap = Snapshot::from_json(r#"{"decks": {}, "history": []}"#).unwrap();
        assert_eq!(snap.history, Some(Vec::new()));
    }

    #[test]
    fn file_name_uses_export_date() {
        let snap = Snapshot {
            decks: Map::new(),
            history: None,
            draw_count: None,
            export_date: Some(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()),
        };
        insta::assert_snapshot!(snap.file_name(), @"trpg-cards-export-2026-10-19.json");
    }
}
