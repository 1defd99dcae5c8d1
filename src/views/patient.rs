use tracing::warn;

use crate::api::PatientDashboardData;
use crate::client::ApiClient;

use super::ViewTask;

/// The patient's own home view, served as one aggregate by the backend
/// (profile, appointments and medical records in a single payload).
#[derive(Debug, Clone, Default)]
pub struct PatientHome {
    pub data: PatientDashboardData,
}

impl PatientHome {
    pub async fn load(client: &ApiClient) -> Self {
        match client.patient_dashboard().await {
            Ok(data) => Self { data },
            Err(e) => {
                warn!("patient home fetch failed, falling back to empty view: {e}");
                Self::default()
            }
        }
    }

    pub fn spawn(client: ApiClient) -> ViewTask<Self> {
        ViewTask::spawn(async move { Self::load(&client).await })
    }
}
