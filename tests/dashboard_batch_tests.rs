//! View-batch semantics: each dashboard's parallel fetch is all-or-nothing,
//! so one rejected request discards every partial result and the view falls
//! back to its all-default state.

mod support;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use carelink::views::{AdminDashboard, DoctorDashboard, PatientHome, ReceptionistDesk};
use support::{make_client, ok_data, seeded_store, serve};

fn patients_json() -> serde_json::Value {
    json!([
        { "id": 1, "patient_id": "P001", "name": "Ann Chen", "status": "Active" },
        { "id": 2, "patient_id": "P002", "name": "Bob Osei", "status": "Active" }
    ])
}

fn doctors_json() -> serde_json::Value {
    json!([{ "id": 9, "first_name": "Sarah", "last_name": "Wilson", "department": "Cardiology" }])
}

fn appointments_json(today: &str) -> serde_json::Value {
    json!([
        { "id": 1, "patient_name": "Ann Chen", "doctor_name": "Sarah Wilson",
          "date": today, "time": "14:30", "type": "Consultation", "status": "Scheduled" },
        { "id": 2, "patient_name": "Bob Osei", "doctor_name": "Sarah Wilson",
          "date": "2020-01-01", "time": "09:00", "type": "Checkup", "status": "Completed" }
    ])
}

fn notifications_json() -> serde_json::Value {
    json!([
        { "id": 1, "notification_type": "patient_registration", "title": "New patient",
          "message": "John Doe registered", "is_read": false },
        { "id": 2, "notification_type": "system", "title": "Maintenance",
          "message": "Done", "is_read": true }
    ])
}

#[tokio::test]
async fn admin_batch_success_populates_and_derives_stats() {
    let today = chrono::Local::now().date_naive().to_string();
    let apts = appointments_json(&today);
    let app = Router::new()
        .route("/api/patients/", get(|| async { Json(ok_data(patients_json())) }))
        .route("/api/doctors/", get(|| async { Json(ok_data(doctors_json())) }))
        .route(
            "/api/appointments/",
            get(move || {
                let apts = apts.clone();
                async move { Json(ok_data(apts)) }
            }),
        )
        .route("/api/notifications/", get(|| async { Json(ok_data(notifications_json())) }));
    let base = serve(app).await;
    let (_dir, store) = seeded_store("acc", "ref");

    let view = AdminDashboard::load(&make_client(&base, store)).await;
    assert_eq!(view.patients.len(), 2);
    assert_eq!(view.doctors.len(), 1);
    assert_eq!(view.appointments.len(), 2);
    assert_eq!(view.notifications.len(), 2);
    assert_eq!(view.stats.total_patients, 2);
    assert_eq!(view.stats.total_doctors, 1);
    assert_eq!(view.stats.todays_appointments, 1);
    assert_eq!(view.stats.unread_notifications, 1);
}

#[tokio::test]
async fn admin_batch_failure_discards_partial_results() {
    // three of four succeed; the failing notifications request must still
    // leave every piece of state at its default
    let today = chrono::Local::now().date_naive().to_string();
    let apts = appointments_json(&today);
    let app = Router::new()
        .route("/api/patients/", get(|| async { Json(ok_data(patients_json())) }))
        .route("/api/doctors/", get(|| async { Json(ok_data(doctors_json())) }))
        .route(
            "/api/appointments/",
            get(move || {
                let apts = apts.clone();
                async move { Json(ok_data(apts)) }
            }),
        )
        .route(
            "/api/notifications/",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "boom" })),
                )
            }),
        );
    let base = serve(app).await;
    let (_dir, store) = seeded_store("acc", "ref");

    let view = AdminDashboard::load(&make_client(&base, store)).await;
    assert!(view.patients.is_empty());
    assert!(view.doctors.is_empty());
    assert!(view.appointments.is_empty());
    assert!(view.notifications.is_empty());
    assert_eq!(view.stats, Default::default());
}

#[tokio::test]
async fn doctor_batch_happy_path() {
    let app = Router::new()
        .route("/api/doctor/patients/", get(|| async { Json(ok_data(patients_json())) }))
        .route(
            "/api/doctor/appointments/",
            get(|| async { Json(ok_data(appointments_json("2026-08-27"))) }),
        )
        .route(
            "/api/doctor/stats/",
            get(|| async {
                Json(ok_data(json!({
                    "totalPatients": 2, "totalAppointments": 2,
                    "todaysAppointments": 1, "pendingAppointments": 0
                })))
            }),
        );
    let base = serve(app).await;
    let (_dir, store) = seeded_store("acc", "ref");

    let view = DoctorDashboard::load(&make_client(&base, store)).await;
    assert_eq!(view.patients.len(), 2);
    assert_eq!(view.appointments.len(), 2);
    assert_eq!(view.stats.total_patients, 2);
    assert_eq!(view.stats.todays_appointments, 1);
}

#[tokio::test]
async fn receptionist_desk_failure_defaults() {
    let app = Router::new()
        .route("/api/appointments/", get(|| async { Json(ok_data(json!([]))) }))
        .route(
            "/api/patients/",
            get(|| async {
                (StatusCode::BAD_GATEWAY, Json(json!({ "success": false })))
            }),
        );
    let base = serve(app).await;
    let (_dir, store) = seeded_store("acc", "ref");

    let view = ReceptionistDesk::load(&make_client(&base, store)).await;
    assert!(view.appointments.is_empty());
    assert!(view.patients.is_empty());
}

#[tokio::test]
async fn patient_home_aggregate_loads_and_degrades() {
    let app = Router::new().route(
        "/api/patient/dashboard/",
        get(|| async {
            Json(ok_data(json!({
                "patient": { "id": 4, "name": "Ann Chen", "assigned_doctor": "Sarah Wilson" },
                "appointments": [
                    { "id": 1, "doctor_name": "Sarah Wilson", "date": "2026-09-01",
                      "time": "10:00", "type": "Follow-up", "status": "Scheduled" }
                ],
                "medical_records": [
                    { "id": 1, "doctor_name": "Sarah Wilson", "record_type": "Lab Result",
                      "description": "All clear", "status": "Completed" }
                ]
            })))
        }),
    );
    let base = serve(app).await;
    let (_dir, store) = seeded_store("acc", "ref");
    let client = make_client(&base, store);

    let view = PatientHome::load(&client).await;
    assert_eq!(view.data.appointments.len(), 1);
    assert_eq!(view.data.medical_records.len(), 1);
    assert!(view.data.patient.is_some());

    // an unreachable aggregate degrades to the empty default
    let (_dir2, store2) = seeded_store("acc", "ref");
    let dead = make_client("http://127.0.0.1:1/api", store2);
    let view = PatientHome::load(&dead).await;
    assert!(view.data.appointments.is_empty());
    assert!(view.data.patient.is_none());
}
