//! Wire-level JSON contracts shared with the hospital backend.
//! Every response is wrapped in the backend's `{success, data, message,
//! errors}` envelope; models mirror the serializer output field for field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Field-level validation errors on create/update calls; shape varies
    /// per endpoint so it stays untyped.
    pub errors: Option<serde_json::Value>,
}

/// Acknowledgement for calls that return no data payload (logout, register,
/// create/update/delete).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
    Patient,
    /// Forward-compat catch-all; routed to the generic admin landing page.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() { self.username.clone() } else { full.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshData {
    pub access: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub assigned_doctor: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// ISO date `YYYY-MM-DD`, kept as sent by the backend.
    pub date: String,
    pub time: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub record_type: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Per-doctor counters from `GET doctor/stats/` (camelCase on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorStats {
    pub total_patients: u64,
    pub total_appointments: u64,
    pub todays_appointments: u64,
    pub pending_appointments: u64,
}

/// Aggregate payload of `GET patient/dashboard/`. The profile block may be a
/// sparse placeholder while the admin is still setting the patient up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientDashboardData {
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub medical_records: Vec<MedicalRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_parses_lowercase_and_tolerates_unknown() {
        assert_eq!(serde_json::from_value::<Role>(json!("doctor")).unwrap(), Role::Doctor);
        assert_eq!(serde_json::from_value::<Role>(json!("receptionist")).unwrap(), Role::Receptionist);
        assert_eq!(serde_json::from_value::<Role>(json!("superuser")).unwrap(), Role::Unknown);
    }

    #[test]
    fn appointment_type_field_is_renamed() {
        let a: Appointment = serde_json::from_value(json!({
            "id": 1, "date": "2026-08-27", "time": "10:30", "type": "Consultation"
        }))
        .unwrap();
        assert_eq!(a.kind.as_deref(), Some("Consultation"));
    }

    #[test]
    fn doctor_stats_accepts_camel_case() {
        let s: DoctorStats = serde_json::from_value(json!({
            "totalPatients": 12, "totalAppointments": 40,
            "todaysAppointments": 3, "pendingAppointments": 5
        }))
        .unwrap();
        assert_eq!(s.total_patients, 12);
        assert_eq!(s.pending_appointments, 5);
    }

    #[test]
    fn envelope_error_shape_parses() {
        let env: ApiEnvelope<LoginData> = serde_json::from_value(json!({
            "success": false, "message": "Invalid credentials"
        }))
        .unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut u: UserProfile = serde_json::from_value(json!({
            "id": 1, "username": "jdoe", "email": "j@x", "role": "patient"
        }))
        .unwrap();
        assert_eq!(u.display_name(), "jdoe");
        u.first_name = "Jane".into();
        u.last_name = "Doe".into();
        assert_eq!(u.display_name(), "Jane Doe");
    }
}
