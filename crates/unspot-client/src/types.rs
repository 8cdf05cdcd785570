//! Booking API wire types.

use serde::Deserialize;

/// A booking eligible for check-in.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    /// Booking identifier, opaque to the daemon.
    pub id: String,
    /// Spaces reserved by this booking.
    #[serde(default)]
    pub spaces: Vec<Space>,
}

/// A named space attached to a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    pub name: String,
}

impl Booking {
    /// Comma-joined space names, as shown in check-in log lines.
    pub fn space_names(&self) -> String {
        self.spaces
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Envelope returned by the checkin-available-list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckinListResponse {
    pub body: CheckinListBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckinListBody {
    pub bookings: Vec<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkin_list_envelope() {
        let json = serde_json::json!({
            "body": {
                "bookings": [
                    { "id": "A1", "spaces": [{ "name": "Desk1" }] },
                    { "id": "A2", "spaces": [{ "name": "Desk2" }, { "name": "Desk3" }] }
                ]
            }
        });

        let response: CheckinListResponse = serde_json::from_value(json).unwrap();
        let bookings = response.body.bookings;

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, "A1");
        assert_eq!(bookings[1].spaces.len(), 2);
    }

    #[test]
    fn test_parse_booking_without_spaces() {
        let json = serde_json::json!({ "id": "B7" });
        let booking: Booking = serde_json::from_value(json).unwrap();

        assert_eq!(booking.id, "B7");
        assert!(booking.spaces.is_empty());
        assert_eq!(booking.space_names(), "");
    }

    #[test]
    fn test_space_names_joined_with_commas() {
        let booking = Booking {
            id: "A2".to_string(),
            spaces: vec![
                Space {
                    name: "Desk2".to_string(),
                },
                Space {
                    name: "Desk3".to_string(),
                },
            ],
        };

        assert_eq!(booking.space_names(), "Desk2,Desk3");
    }
}
