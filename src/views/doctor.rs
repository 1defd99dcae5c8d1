use futures_util::future::try_join3;
use tracing::warn;

use crate::api::{Appointment, DoctorStats, Patient};
use crate::client::ApiClient;

use super::ViewTask;

#[derive(Debug, Clone, Default)]
pub struct DoctorDashboard {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub stats: DoctorStats,
}

impl DoctorDashboard {
    /// Assigned patients, own appointments and the backend-computed stat
    /// block, fetched in parallel; all-or-nothing like every view batch.
    pub async fn load(client: &ApiClient) -> Self {
        let batch = try_join3(
            client.doctor_patients(),
            client.doctor_appointments(),
            client.doctor_stats(),
        )
        .await;
        match batch {
            Ok((patients, appointments, stats)) => Self { patients, appointments, stats },
            Err(e) => {
                warn!("doctor dashboard fetch failed, falling back to empty view: {e}");
                Self::default()
            }
        }
    }

    pub fn spawn(client: ApiClient) -> ViewTask<Self> {
        ViewTask::spawn(async move { Self::load(&client).await })
    }
}
