//! Enrollment - a standing weekly student/tutor pairing.
//!
//! Enrollments are owned by the enrollment-management side of the platform;
//! the scheduler only ever reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EnrollmentId, ProfileId};

/// Reference to a student or tutor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRef {
    pub id: ProfileId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ProfileRef {
    /// Reference carrying only the identifier.
    pub fn with_id(id: ProfileId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        }
    }
}

/// Weekly availability slot as stored on the enrollment.
///
/// Values are kept as raw strings; they are validated when the enrollment
/// is expanded so one corrupt row cannot fail a whole read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// Weekday name, e.g. "Wednesday".
    pub day: String,
    /// Local start time, "HH:MM".
    pub start_time: String,
    /// Local end time, "HH:MM".
    pub end_time: String,
}

/// A recurring tutoring agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student: Option<ProfileRef>,
    pub tutor: Option<ProfileRef>,
    /// First local date (reference timezone) a session may start on.
    pub start_date: NaiveDate,
    /// Session length in hours.
    pub duration: f64,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub paused: bool,
}

impl Enrollment {
    /// The slot that drives session generation.
    ///
    /// Only the first slot is consulted; further slots are ignored.
    pub fn primary_slot(&self) -> Option<&AvailabilitySlot> {
        self.availability.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_row() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "student": {"id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8", "firstName": "Ada"},
            "tutor": null,
            "startDate": "2024-01-01",
            "duration": 1.5,
            "availability": [
                {"day": "Wednesday", "startTime": "15:00", "endTime": "16:30"},
                {"day": "Friday", "startTime": "10:00", "endTime": "11:30"}
            ],
            "summary": "Algebra"
        }"#;

        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert_eq!(enrollment.student.as_ref().unwrap().first_name, "Ada");
        assert!(enrollment.tutor.is_none());
        assert!(!enrollment.paused);
        assert_eq!(enrollment.duration, 1.5);
        assert_eq!(enrollment.primary_slot().unwrap().day, "Wednesday");
    }

    #[test]
    fn primary_slot_is_none_without_availability() {
        let enrollment = Enrollment {
            id: EnrollmentId::new(),
            student: None,
            tutor: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration: 1.0,
            availability: vec![],
            meeting_id: None,
            summary: String::new(),
            paused: false,
        };
        assert!(enrollment.primary_slot().is_none());
    }
}
