//! Activity Data Model
//!
//! Types for the activity map returned by `GET /activities` and the
//! response bodies of the mutation endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named, capacity-bounded signup opportunity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Participant emails in server order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Number of registered participants
    pub fn enrolled(&self) -> usize {
        self.participants.len()
    }

    /// Capacity fraction as shown on a card, e.g. `2/25`
    pub fn capacity(&self) -> String {
        format!("{}/{}", self.enrolled(), self.max_participants)
    }

    /// Remaining places, never negative
    pub fn spots_left(&self) -> usize {
        (self.max_participants as usize).saturating_sub(self.enrolled())
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// The activity map, in the order the server sent it.
///
/// Each load replaces the whole map; nothing is merged between loads.
/// Equality is order-sensitive, so a reordered map is a different map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activities {
    entries: IndexMap<String, Activity>,
}

impl Activities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an activity. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        self.entries.insert(name.into(), activity);
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Activities {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Activities {}

impl FromIterator<(String, Activity)> for Activities {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        Activities {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Success body of the signup and unregister endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Failure body of the signup and unregister endpoints.
///
/// `detail` is only used when it is a non-empty string; validation failures
/// send an array here instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Soccer Team": {
            "description": "Join the varsity soccer team",
            "schedule": "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
            "max_participants": 25,
            "participants": ["alex@mergington.edu", "ryan@mergington.edu"]
        },
        "Basketball Club": {
            "description": "Practice basketball skills",
            "schedule": "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            "max_participants": 15,
            "participants": []
        },
        "Art Studio": {
            "description": "Painting and drawing",
            "schedule": "Fridays, 3:30 PM - 5:00 PM",
            "max_participants": 2,
            "participants": ["a@mergington.edu", "b@mergington.edu", "c@mergington.edu"]
        }
    }"#;

    #[test]
    fn test_deserialize_keeps_server_order() {
        let activities: Activities = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<&str> = activities.names().collect();
        assert_eq!(names, vec!["Soccer Team", "Basketball Club", "Art Studio"]);
    }

    #[test]
    fn test_capacity_and_spots() {
        let activities: Activities = serde_json::from_str(SAMPLE).unwrap();

        let soccer = activities.get("Soccer Team").unwrap();
        assert_eq!(soccer.capacity(), "2/25");
        assert_eq!(soccer.spots_left(), 23);
        assert!(!soccer.is_full());

        // Over-subscribed activities saturate instead of underflowing
        let art = activities.get("Art Studio").unwrap();
        assert_eq!(art.capacity(), "3/2");
        assert_eq!(art.spots_left(), 0);
        assert!(art.is_full());
    }

    #[test]
    fn test_missing_participants_defaults_to_empty() {
        let activities: Activities = serde_json::from_str(
            r#"{"Chess Club": {"description": "d", "schedule": "s", "max_participants": 12}}"#,
        )
        .unwrap();
        assert_eq!(activities.get("Chess Club").unwrap().enrolled(), 0);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<Activities>("[]").is_err());
        assert!(serde_json::from_str::<Activities>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut activities = Activities::new();
        let activity = |max| Activity {
            description: String::new(),
            schedule: String::new(),
            max_participants: max,
            participants: Vec::new(),
        };
        activities.insert("A", activity(1));
        activities.insert("B", activity(2));
        activities.insert("A", activity(3));

        assert_eq!(activities.len(), 2);
        assert_eq!(activities.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(activities.get("A").unwrap().max_participants, 3);
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let activities: Activities = serde_json::from_str(
            r#"{
                "A": {"description": "old", "schedule": "s", "max_participants": 1},
                "B": {"description": "b", "schedule": "s", "max_participants": 1},
                "A": {"description": "new", "schedule": "s", "max_participants": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(activities.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(activities.get("A").unwrap().description, "new");
    }

    #[test]
    fn test_equality_follows_order() {
        let forward: Activities = serde_json::from_str(SAMPLE).unwrap();
        let reversed: Activities = forward
            .iter()
            .rev()
            .map(|(name, activity)| (name.to_string(), activity.clone()))
            .collect();

        assert_eq!(forward, forward.clone());
        assert_ne!(forward, reversed);
        assert_eq!(forward.len(), reversed.len());
    }

    #[test]
    fn test_serialize_round_trips_order() {
        let activities: Activities = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&activities).unwrap();
        let soccer = json.find("Soccer Team").unwrap();
        let art = json.find("Art Studio").unwrap();
        assert!(soccer < art);
    }

    #[test]
    fn test_error_detail_only_uses_strings() {
        let with_text: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Already signed up"}"#).unwrap();
        assert_eq!(with_text.detail_text(), Some("Already signed up"));

        let validation: ErrorResponse =
            serde_json::from_str(r#"{"detail": [{"loc": ["query", "email"]}]}"#).unwrap();
        assert_eq!(validation.detail_text(), None);

        let empty: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.detail_text(), None);

        let blank: ErrorResponse = serde_json::from_str(r#"{"detail": ""}"#).unwrap();
        assert_eq!(blank.detail_text(), None);
    }
}
