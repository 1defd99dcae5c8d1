use chrono::Local;
use futures_util::future::try_join4;
use tracing::warn;

use crate::api::{Appointment, Doctor, Notification, Patient};
use crate::client::ApiClient;

use super::ViewTask;

/// Headline counters derived client-side from the fetched collections,
/// the same derivation the dashboard header renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub todays_appointments: usize,
    pub unread_notifications: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub notifications: Vec<Notification>,
    pub stats: AdminStats,
}

impl AdminDashboard {
    /// Fetch patients, doctors, appointments and notifications in parallel.
    /// Any single failure yields the all-default dashboard.
    pub async fn load(client: &ApiClient) -> Self {
        let batch = try_join4(
            client.list_patients(),
            client.list_doctors(),
            client.list_appointments(),
            client.list_notifications(),
        )
        .await;
        match batch {
            Ok((patients, doctors, appointments, notifications)) => {
                let today = Local::now().date_naive().to_string();
                let stats = AdminStats {
                    total_patients: patients.len(),
                    total_doctors: doctors.len(),
                    todays_appointments: appointments.iter().filter(|a| a.date == today).count(),
                    unread_notifications: notifications.iter().filter(|n| !n.is_read).count(),
                };
                Self { patients, doctors, appointments, notifications, stats }
            }
            Err(e) => {
                warn!("admin dashboard fetch failed, falling back to empty view: {e}");
                Self::default()
            }
        }
    }

    pub fn spawn(client: ApiClient) -> ViewTask<Self> {
        ViewTask::spawn(async move { Self::load(&client).await })
    }
}
