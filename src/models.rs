use serde::{Deserialize, Serialize};

/// A parking facility, identified by its name ("sijainti").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub sijainti: String,
}

/// A single parking spot within the currently selected location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(rename = "idParkit")]
    pub id_parkit: String,
    /// Availability flag; only free spots are selectable.
    pub vapaa: bool,
}

/// A reservation as returned by the backend. Read-only cached copy for
/// display; authoritative only after a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub sijainti: String,
    pub parkki: String,
    pub rekisteri: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

/// Create-reservation request body. `userid` and `rekisteri` come from the
/// session store and may be absent; the backend receives `null` then, which
/// is what the original client sent when storage was empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub userid: Option<String>,
    #[serde(rename = "idParkit")]
    pub id_parkit: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub rekisteri: Option<String>,
    pub sijainti: String,
}

/// Every backend response wraps its payload in a `result` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

/// Outcome signaled by the backend for create/delete requests. The contract
/// is loose: the exact string "successful" means success, any other value
/// (an error object, a different string, null) signals failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Successful,
    Rejected,
}

impl SubmitOutcome {
    pub fn from_result(result: &serde_json::Value) -> Self {
        match result.as_str() {
            Some("successful") => Self::Successful,
            _ => Self::Rejected,
        }
    }

    pub fn is_successful(self) -> bool {
        matches!(self, Self::Successful)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submit_outcome_recognizes_only_exact_success_string() {
        assert_eq!(
            SubmitOutcome::from_result(&json!("successful")),
            SubmitOutcome::Successful
        );
        assert_eq!(
            SubmitOutcome::from_result(&json!("Successful")),
            SubmitOutcome::Rejected
        );
        assert_eq!(
            SubmitOutcome::from_result(
                &json!({ "error": "Reservation cannot be made over other reservation" })
            ),
            SubmitOutcome::Rejected
        );
        assert_eq!(
            SubmitOutcome::from_result(&json!(null)),
            SubmitOutcome::Rejected
        );
    }

    #[test]
    fn new_reservation_serializes_wire_field_names() {
        let body = NewReservation {
            userid: Some("u-1".to_string()),
            id_parkit: "A12".to_string(),
            start_time: "12:00:00".to_string(),
            end_time: "15:00:00".to_string(),
            rekisteri: Some("ABC-123".to_string()),
            sijainti: "Keskusta".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "userid": "u-1",
                "idParkit": "A12",
                "startTime": "12:00:00",
                "endTime": "15:00:00",
                "rekisteri": "ABC-123",
                "sijainti": "Keskusta",
            })
        );
    }

    #[test]
    fn missing_session_fields_serialize_as_null() {
        let body = NewReservation {
            userid: None,
            id_parkit: "B3".to_string(),
            start_time: "09:30:00".to_string(),
            end_time: "11:30:00".to_string(),
            rekisteri: None,
            sijainti: "Asema".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value["userid"].is_null());
        assert!(value["rekisteri"].is_null());
    }
}
