use futures_util::future::try_join;
use tracing::warn;

use crate::api::{Appointment, Patient};
use crate::client::ApiClient;

use super::ViewTask;

/// The receptionist front-desk view: the full appointment book plus the
/// patient roster for lookups while scheduling.
#[derive(Debug, Clone, Default)]
pub struct ReceptionistDesk {
    pub appointments: Vec<Appointment>,
    pub patients: Vec<Patient>,
}

impl ReceptionistDesk {
    pub async fn load(client: &ApiClient) -> Self {
        match try_join(client.list_appointments(), client.list_patients()).await {
            Ok((appointments, patients)) => Self { appointments, patients },
            Err(e) => {
                warn!("receptionist desk fetch failed, falling back to empty view: {e}");
                Self::default()
            }
        }
    }

    pub fn spawn(client: ApiClient) -> ViewTask<Self> {
        ViewTask::spawn(async move { Self::load(&client).await })
    }
}
